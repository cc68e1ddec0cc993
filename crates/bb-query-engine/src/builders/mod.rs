//! Per-intent SQL builders.
//!
//! Each builder turns an `EntityBag` into a `QueryResult`: a SQL template with
//! `:name` placeholders, the values bound to exactly those placeholders, a
//! human-readable description, and a fixed result type. Builders never
//! execute anything.

pub mod appointment_info;
pub mod blood_availability;
pub mod camp_info;
pub mod center_info;
pub mod donor_stats;
pub mod general;

use std::collections::BTreeMap;

use bb_protocol::{BloodGroup, EntityBag, Location, QueryResult, ResultType, TimePeriodKind};

use crate::intent::Intent;

/// Placeholder names shared by all builders.
pub const BLOOD_GROUP: &str = "blood_group";
pub const LOCATION: &str = "location";
pub const COMPONENT: &str = "component";

/// Signature shared by every builder.
pub type Builder = fn(&EntityBag) -> QueryResult;

/// Builder for an intent. `General` gets the fallback builder.
pub fn builder_for(intent: Intent) -> Builder {
    match intent {
        Intent::BloodAvailability => blood_availability::build,
        Intent::CenterInfo => center_info::build,
        Intent::CampInfo => camp_info::build,
        Intent::DonorStats => donor_stats::build,
        Intent::AppointmentInfo => appointment_info::build,
        Intent::General => general::build,
    }
}

// ── Statement assembly ──────────────────────────────────────────

/// Accumulates predicates and bound values on top of a base SELECT.
pub(crate) struct Statement {
    sql: String,
    has_where: bool,
    conditions: Vec<String>,
    params: BTreeMap<String, String>,
}

impl Statement {
    /// `has_where` is true when the base query already ends in a WHERE clause,
    /// so extra predicates are AND-appended to it.
    pub(crate) fn new(base: &str, has_where: bool) -> Self {
        Self {
            sql: base.to_string(),
            has_where,
            conditions: Vec::new(),
            params: BTreeMap::new(),
        }
    }

    pub(crate) fn filter(&mut self, condition: impl Into<String>) -> &mut Self {
        self.conditions.push(condition.into());
        self
    }

    pub(crate) fn bind(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.params.insert(name.to_string(), value.into());
        self
    }

    /// Exact-match blood group predicate against `column`.
    pub(crate) fn blood_group(&mut self, column: &str, group: BloodGroup) -> &mut Self {
        self.filter(format!("LOWER({column}) = :{BLOOD_GROUP}"))
            .bind(BLOOD_GROUP, group.as_str())
    }

    /// Fuzzy location predicate: any of `columns` contains the location.
    pub(crate) fn location(&mut self, columns: &[&str], location: Location) -> &mut Self {
        let any = columns
            .iter()
            .map(|c| format!("LOWER({c}) LIKE :{LOCATION}"))
            .collect::<Vec<_>>()
            .join(" OR ");
        self.filter(format!("({any})"))
            .bind(LOCATION, like_pattern(location.as_str()))
    }

    /// Date predicate on `column` for a time-period kind.
    pub(crate) fn period(&mut self, column: &str, kind: TimePeriodKind) -> &mut Self {
        self.filter(period_predicate(column, kind))
    }

    pub(crate) fn finish(
        mut self,
        tail: &str,
        description: String,
        result_type: ResultType,
    ) -> QueryResult {
        if !self.conditions.is_empty() {
            let keyword = if self.has_where { " AND " } else { " WHERE " };
            self.sql.push_str(keyword);
            self.sql.push_str(&self.conditions.join(" AND "));
        }
        self.sql.push_str(tail);

        QueryResult {
            sql: self.sql,
            params: self.params,
            description,
            result_type,
        }
    }
}

/// Wrap a value for a substring LIKE match.
pub(crate) fn like_pattern(value: &str) -> String {
    format!("%{value}%")
}

/// Date predicate for `column`. Only `CURRENT_DATE` arithmetic is emitted,
/// never a literal date.
pub(crate) fn period_predicate(column: &str, kind: TimePeriodKind) -> String {
    match kind {
        TimePeriodKind::Upcoming => format!("{column} >= CURRENT_DATE"),
        TimePeriodKind::Today => format!("{column} = CURRENT_DATE"),
        TimePeriodKind::ThisWeek => {
            format!("{column} BETWEEN CURRENT_DATE AND CURRENT_DATE + INTERVAL '7 days'")
        }
        TimePeriodKind::ThisMonth => format!(
            "{column} >= DATE_TRUNC('month', CURRENT_DATE) \
             AND {column} < DATE_TRUNC('month', CURRENT_DATE) + INTERVAL '1 month'"
        ),
    }
}

// ── Descriptions ────────────────────────────────────────────────

/// Builds a description: base phrase, then blood group, then location, then
/// a parenthetical. Clause order is fixed.
pub(crate) struct Description(String);

impl Description {
    pub(crate) fn new(base: &str) -> Self {
        Self(base.to_string())
    }

    pub(crate) fn blood_group(mut self, group: Option<BloodGroup>) -> Self {
        if let Some(group) = group {
            self.0.push_str(&format!(" for {} blood", group.label()));
        }
        self
    }

    pub(crate) fn location(mut self, location: Option<Location>) -> Self {
        if let Some(location) = location {
            self.0.push_str(&format!(" in {}", location.display_name()));
        }
        self
    }

    pub(crate) fn parenthetical(mut self, note: Option<&str>) -> Self {
        if let Some(note) = note {
            self.0.push_str(&format!(" ({note})"));
        }
        self
    }

    pub(crate) fn build(self) -> String {
        self.0
    }
}

/// Placeholder names referenced in a SQL template (`:name`, ignoring `::`
/// casts and quoted literals).
pub fn placeholders(sql: &str) -> Vec<String> {
    let mut names = Vec::new();
    let chars: Vec<char> = sql.chars().collect();
    let mut i = 0;
    let mut in_literal = false;

    while i < chars.len() {
        let c = chars[i];
        if c == '\'' {
            in_literal = !in_literal;
        } else if !in_literal && c == ':' {
            if chars.get(i + 1) == Some(&':') {
                i += 2;
                continue;
            }
            let start = i + 1;
            let mut end = start;
            while end < chars.len() && (chars[end].is_ascii_alphanumeric() || chars[end] == '_') {
                end += 1;
            }
            if end > start && !chars[start].is_ascii_digit() {
                let name: String = chars[start..end].iter().collect();
                if !names.contains(&name) {
                    names.push(name);
                }
            }
            i = end.max(i + 1);
            continue;
        }
        i += 1;
    }
    names
}
