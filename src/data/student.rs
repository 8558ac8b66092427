use crate::error::{ParseDateSnafu, RollbookResult};
use maud::{Markup, Render, html};
use serde::{Deserialize, Serialize};
use snafu::ResultExt;
use time::{Date, OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};
use uuid::Uuid;

pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone_number: String,
    #[serde(with = "iso_date::option")]
    pub date_of_birth: Option<Date>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Student {
    pub fn date_of_birth_display(&self) -> String {
        self.date_of_birth
            .and_then(|dob| dob.format(DATE_FORMAT).ok())
            .unwrap_or_default()
    }
}

impl Render for Student {
    fn render(&self) -> Markup {
        html! {
            (self.name)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone_number: String,
    pub date_of_birth: Option<Date>,
}

impl NewStudent {
    pub fn into_student(self, id: Uuid, now: OffsetDateTime) -> Student {
        let Self {
            name,
            email,
            address,
            phone_number,
            date_of_birth,
        } = self;

        Student {
            id,
            name,
            email,
            address,
            phone_number,
            date_of_birth,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    /// `Some(None)` clears the date
    pub date_of_birth: Option<Option<Date>>,
}

impl StudentPatch {
    pub fn apply(self, student: &mut Student, now: OffsetDateTime) {
        let Self {
            name,
            email,
            address,
            phone_number,
            date_of_birth,
        } = self;

        if let Some(name) = name {
            student.name = name;
        }
        if let Some(email) = email {
            student.email = email;
        }
        if let Some(address) = address {
            student.address = address;
        }
        if let Some(phone_number) = phone_number {
            student.phone_number = phone_number;
        }
        if let Some(date_of_birth) = date_of_birth {
            student.date_of_birth = date_of_birth;
        }
        student.updated_at = now;
    }
}

///empty strings mean "no date"
pub fn parse_date_of_birth(raw: &str) -> RollbookResult<Option<Date>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    Date::parse(trimmed, DATE_FORMAT)
        .map(Some)
        .context(ParseDateSnafu { original: raw })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    fn sample() -> Student {
        NewStudent {
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            address: "12 St James's Square".into(),
            phone_number: "555-0100".into(),
            date_of_birth: Some(date!(1815 - 12 - 10)),
        }
        .into_student(Uuid::nil(), datetime!(2025-01-01 09:00 UTC))
    }

    #[test]
    fn dates_parse_as_iso() {
        assert_eq!(
            parse_date_of_birth("1815-12-10").unwrap(),
            Some(date!(1815 - 12 - 10))
        );
        assert_eq!(parse_date_of_birth("   ").unwrap(), None);
        assert!(parse_date_of_birth("10/12/1815").is_err());
    }

    #[test]
    fn patch_only_touches_given_fields() {
        let mut student = sample();
        let later = datetime!(2025-02-01 09:00 UTC);

        StudentPatch {
            email: Some("countess@example.com".into()),
            ..StudentPatch::default()
        }
        .apply(&mut student, later);

        assert_eq!(student.email, "countess@example.com");
        assert_eq!(student.name, "Ada Lovelace");
        assert_eq!(student.date_of_birth, Some(date!(1815 - 12 - 10)));
        assert_eq!(student.created_at, datetime!(2025-01-01 09:00 UTC));
        assert_eq!(student.updated_at, later);
    }

    #[test]
    fn patch_can_clear_the_date() {
        let mut student = sample();

        StudentPatch::default().apply(&mut student, datetime!(2025-02-01 09:00 UTC));
        assert_eq!(student.date_of_birth, Some(date!(1815 - 12 - 10)));

        StudentPatch {
            date_of_birth: Some(None),
            ..StudentPatch::default()
        }
        .apply(&mut student, datetime!(2025-03-01 09:00 UTC));
        assert_eq!(student.date_of_birth, None);
        assert_eq!(student.date_of_birth_display(), "");
    }

    #[test]
    fn serialises_with_iso_date() {
        let student = sample();
        assert_eq!(student.date_of_birth_display(), "1815-12-10");

        let json = serde_json::to_value(&student).unwrap();
        assert_eq!(json["date_of_birth"], "1815-12-10");
        assert_eq!(json["phone_number"], "555-0100");
        assert_eq!(json["created_at"], "2025-01-01T09:00:00Z");
    }
}
