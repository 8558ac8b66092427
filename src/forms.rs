//! The five-control student form shared by the add and update views.

use crate::{
    data::student::{NewStudent, Student, StudentPatch, parse_date_of_birth},
    error::RollbookResult,
    maud_conveniences::{form_submit_button, simple_form_element},
};
use maud::{Markup, html};
use serde::Deserialize;
use uuid::Uuid;

/// `(control name, label, input type)` for every control, in display order.
pub const STUDENT_FORM_CONTROLS: [(&str, &str, &str); 5] = [
    ("Name", "Name", "text"),
    ("Email", "Email", "email"),
    ("address", "Address", "text"),
    ("phone", "Phone", "tel"),
    ("date_of_birth", "Date of Birth", "date"),
];

/// Raw control values. Nothing here is validated; every control starts empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StudentForm {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Email", default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub date_of_birth: String,
}

impl From<&Student> for StudentForm {
    fn from(student: &Student) -> Self {
        Self {
            name: student.name.clone(),
            email: student.email.clone(),
            address: student.address.clone(),
            phone: student.phone_number.clone(),
            date_of_birth: student.date_of_birth_display(),
        }
    }
}

impl StudentForm {
    pub fn control_value(&self, control: &str) -> Option<&str> {
        let value = match control {
            "Name" => &self.name,
            "Email" => &self.email,
            "address" => &self.address,
            "phone" => &self.phone,
            "date_of_birth" => &self.date_of_birth,
            _ => return None,
        };
        Some(value.as_str())
    }

    pub fn into_new_student(self) -> RollbookResult<NewStudent> {
        let date_of_birth = parse_date_of_birth(&self.date_of_birth)?;
        Ok(NewStudent {
            name: self.name,
            email: self.email,
            address: self.address,
            phone_number: self.phone,
            date_of_birth,
        })
    }

    /// Every control is written back, so a blanked date clears the stored one.
    pub fn into_patch(self) -> RollbookResult<StudentPatch> {
        let date_of_birth = parse_date_of_birth(&self.date_of_birth)?;
        Ok(StudentPatch {
            name: Some(self.name),
            email: Some(self.email),
            address: Some(self.address),
            phone_number: Some(self.phone),
            date_of_birth: Some(date_of_birth),
        })
    }

    /// `existing` adds the hidden id the update view posts back.
    pub fn render(&self, hx_post: &'static str, existing: Option<Uuid>, submit: &'static str) -> Markup {
        html! {
            form hx-post=(hx_post) hx-trigger="submit" hx-target="#in_focus" class="p-4" {
                @if let Some(id) = existing {
                    input type="hidden" name="id" value=(id) {}
                }
                @for (control, label, input_type) in STUDENT_FORM_CONTROLS {
                    @let value = self.control_value(control).filter(|value| !value.is_empty());
                    (simple_form_element(control, label, false, Some(input_type), value))
                }
                (form_submit_button(Some(submit)))
            }
        }
    }
}

/// What the update view posts: the five controls plus which student they belong to.
#[derive(Debug, Deserialize)]
pub struct UpdateStudentForm {
    pub id: Uuid,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Email", default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub date_of_birth: String,
}

impl UpdateStudentForm {
    pub fn split(self) -> (Uuid, StudentForm) {
        let Self {
            id,
            name,
            email,
            address,
            phone,
            date_of_birth,
        } = self;

        (
            id,
            StudentForm {
                name,
                email,
                address,
                phone,
                date_of_birth,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn fresh_form_has_five_empty_controls() {
        let form = StudentForm::default();
        for (control, _, _) in STUDENT_FORM_CONTROLS {
            assert_eq!(form.control_value(control), Some(""));
        }
        assert_eq!(form.control_value("surname"), None);

        let html = form.render("/add", None, "Add Student").into_string();
        assert_eq!(html.matches("<input").count(), 5);
        for (control, _, _) in STUDENT_FORM_CONTROLS {
            assert!(html.contains(&format!("name=\"{control}\"")), "{control} missing");
        }
        assert!(!html.contains("value="));
        assert!(!html.contains("required"));
    }

    #[test]
    fn update_form_carries_hidden_id() {
        let id = Uuid::new_v4();
        let form = StudentForm {
            name: "Grace Hopper".into(),
            ..StudentForm::default()
        };
        let html = form.render("/update", Some(id), "Update Student").into_string();

        assert_eq!(html.matches("<input").count(), 6);
        assert!(html.contains(&format!("value=\"{id}\"")));
        assert!(html.contains("value=\"Grace Hopper\""));
    }

    #[test]
    fn converts_into_new_student() {
        let new = StudentForm {
            name: "Grace Hopper".into(),
            email: "grace@example.com".into(),
            address: "Arlington".into(),
            phone: "555-0101".into(),
            date_of_birth: "1906-12-09".into(),
        }
        .into_new_student()
        .unwrap();

        assert_eq!(new.phone_number, "555-0101");
        assert_eq!(new.date_of_birth, Some(date!(1906 - 12 - 09)));
    }

    #[test]
    fn empty_form_still_converts() {
        let new = StudentForm::default().into_new_student().unwrap();
        assert_eq!(new, NewStudent::default());
    }

    #[test]
    fn blank_date_in_patch_clears() {
        let patch = StudentForm {
            name: "Grace Hopper".into(),
            ..StudentForm::default()
        }
        .into_patch()
        .unwrap();
        assert_eq!(patch.date_of_birth, Some(None));

        let patch = StudentForm {
            date_of_birth: "1906-12-09".into(),
            ..StudentForm::default()
        }
        .into_patch()
        .unwrap();
        assert_eq!(patch.date_of_birth, Some(Some(date!(1906 - 12 - 09))));
    }

    #[test]
    fn bad_date_is_rejected() {
        let form = StudentForm {
            date_of_birth: "next tuesday".into(),
            ..StudentForm::default()
        };
        assert!(form.clone().into_new_student().is_err());
        assert!(form.into_patch().is_err());
    }
}
