use chrono::NaiveDate;
use meibo::domain::customer::{Customer, CustomerDraft};
use thiserror::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("invalid date of birth: {0}")]
    InvalidDate(String),
    #[error("invalid member number: {0}")]
    InvalidMemberNumber(String),
}

/// 顧客フォーム。入力欄と同じく全項目を文字列で保持する。
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CustomerForm {
    pub name: String,
    pub date_of_birth: String,
    pub member_number: String,
    pub interests: String,
}

impl CustomerForm {
    pub fn to_draft(&self) -> Result<CustomerDraft, FormError> {
        let name = required("name", &self.name)?;
        let date_of_birth = required("dateOfBirth", &self.date_of_birth)?;
        let member_number = required("memberNumber", &self.member_number)?;
        let interests = self.interests.trim();
        Ok(CustomerDraft {
            name: name.to_owned(),
            date_of_birth: NaiveDate::parse_from_str(date_of_birth, DATE_FORMAT)
                .map_err(|_| FormError::InvalidDate(date_of_birth.to_owned()))?,
            member_number: member_number
                .parse()
                .map_err(|_| FormError::InvalidMemberNumber(member_number.to_owned()))?,
            interests: (!interests.is_empty()).then(|| interests.to_owned()),
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl From<&Customer> for CustomerForm {
    fn from(value: &Customer) -> Self {
        Self {
            name: value.name().to_owned(),
            date_of_birth: value.date_of_birth().format(DATE_FORMAT).to_string(),
            member_number: value.member_number().to_string(),
            interests: value.interests().unwrap_or_default().to_owned(),
        }
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, FormError> {
    match value.trim() {
        "" => Err(FormError::Required(field)),
        trimmed => Ok(trimmed),
    }
}
