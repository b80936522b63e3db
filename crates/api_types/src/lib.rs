use serde::{Deserialize, Serialize};

mod amount;

pub use amount::{Amount, AmountError};

pub mod category {
    use super::*;

    /// A category entries are filed under.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Category {
        pub id: Option<i64>,
        pub name: Option<String>,
        pub description: Option<String>,
    }
}

pub mod entry {
    use chrono::NaiveDate;

    use super::{category::Category, *};

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum EntryType {
        #[serde(rename = "revenue", alias = "income")]
        Income,
        #[serde(rename = "expense")]
        Expense,
    }

    impl EntryType {
        pub const ALL: [EntryType; 2] = [EntryType::Expense, EntryType::Income];

        /// Returns the wire value used in JSON payloads and form values.
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Income => "revenue",
                Self::Expense => "expense",
            }
        }

        pub fn label(self) -> &'static str {
            match self {
                Self::Income => "Receita",
                Self::Expense => "Despesa",
            }
        }
    }

    /// A ledger entry (lançamento).
    ///
    /// Every field is optional: an unsaved entry starts empty and the
    /// server assigns `id` on creation.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Entry {
        pub id: Option<i64>,
        pub name: Option<String>,
        pub description: Option<String>,
        #[serde(rename = "type")]
        pub kind: Option<EntryType>,
        pub amount: Option<Amount>,
        /// Serialized as `dd/mm/yyyy`.
        #[serde(default, with = "super::date_format")]
        pub date: Option<NaiveDate>,
        pub paid: Option<bool>,
        pub category_id: Option<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub category: Option<Category>,
    }

    impl Entry {
        pub fn paid_text(&self) -> &'static str {
            if self.paid.unwrap_or(false) {
                "Pago"
            } else {
                "Pendente"
            }
        }
    }
}

pub mod error {
    use super::*;

    /// Body returned by the API together with HTTP 422.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ErrorsBody {
        pub errors: Vec<String>,
    }
}

mod date_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    pub const FORMAT: &str = "%d/%m/%Y";
    const ISO_FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.serialize_str(&date.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(raw, FORMAT)
            .or_else(|_| NaiveDate::parse_from_str(raw, ISO_FORMAT))
            .map(Some)
            .map_err(|err| D::Error::custom(format!("invalid date \"{raw}\": {err}")))
    }
}

pub use date_format::FORMAT as DATE_FORMAT;
