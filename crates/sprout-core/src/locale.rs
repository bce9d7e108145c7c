//! User-facing wording for each supported locale.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Locale used for messages and relative times
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "pt")]
    Portuguese,
}

impl Locale {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Portuguese => "pt",
        }
    }

    /// Title of the synthetic "all" environment entry
    #[must_use]
    pub const fn all_environments_label(self) -> &'static str {
        match self {
            Self::English => "all",
            Self::Portuguese => "todos",
        }
    }

    #[must_use]
    pub const fn no_plants_message(self) -> &'static str {
        match self {
            Self::English => "There are no plants to water.",
            Self::Portuguese => "Não há plantas para regar",
        }
    }

    #[must_use]
    pub fn upcoming_watering(self, name: &str, distance: &str) -> String {
        match self {
            Self::English => format!("Don't forget to water the {name} in {distance}."),
            Self::Portuguese => format!("Não esqueça de regar a {name} em {distance}."),
        }
    }

    #[must_use]
    pub fn overdue_watering(self, name: &str, distance: &str) -> String {
        match self {
            Self::English => {
                format!("Don't forget to water the {name}, it was due {distance} ago.")
            }
            Self::Portuguese => format!("Não esqueça de regar a {name}, já passou há {distance}."),
        }
    }

    #[must_use]
    pub fn removal_prompt(self, name: &str) -> String {
        match self {
            Self::English => format!("Do you want to remove the {name}?"),
            Self::Portuguese => format!("Deseja remover a {name}?"),
        }
    }

    #[must_use]
    pub const fn removal_failed(self) -> &'static str {
        match self {
            Self::English => "Could not remove the plant.",
            Self::Portuguese => "Não foi possível remover!",
        }
    }

    #[must_use]
    pub const fn future_time_required(self) -> &'static str {
        match self {
            Self::English => "Choose a time in the future!",
            Self::Portuguese => "Escolha uma hora no futuro!",
        }
    }

    #[must_use]
    pub const fn save_failed(self) -> &'static str {
        match self {
            Self::English => "Could not save the plant.",
            Self::Portuguese => "Não foi possível salvar.",
        }
    }

    pub(crate) const fn confirmation_texts(self) -> (&'static str, &'static str, &'static str) {
        match self {
            Self::English => (
                "All set",
                "Rest easy, we will always remind you to take good care of your plant.",
                "Thank you =)",
            ),
            Self::Portuguese => (
                "Tudo certo",
                "Fique tranquilo que sempre vamos lembrar você de cuidar da sua plantinha com muito cuidado.",
                "Muito obrigado =)",
            ),
        }
    }

    pub(crate) fn distance_phrase(self, unit: DistanceUnit) -> String {
        match (self, unit) {
            (Self::English, DistanceUnit::LessThanMinute) => "less than a minute".to_string(),
            (Self::English, DistanceUnit::Minutes(1)) => "1 minute".to_string(),
            (Self::English, DistanceUnit::Minutes(n)) => format!("{n} minutes"),
            (Self::English, DistanceUnit::AboutHours(1)) => "about 1 hour".to_string(),
            (Self::English, DistanceUnit::AboutHours(n)) => format!("about {n} hours"),
            (Self::English, DistanceUnit::Days(1)) => "1 day".to_string(),
            (Self::English, DistanceUnit::Days(n)) => format!("{n} days"),
            (Self::English, DistanceUnit::AboutMonths(1)) => "about 1 month".to_string(),
            (Self::English, DistanceUnit::AboutMonths(n)) => format!("about {n} months"),
            (Self::English, DistanceUnit::Months(1)) => "1 month".to_string(),
            (Self::English, DistanceUnit::Months(n)) => format!("{n} months"),
            (Self::English, DistanceUnit::AboutYears(1)) => "about 1 year".to_string(),
            (Self::English, DistanceUnit::AboutYears(n)) => format!("about {n} years"),
            (Self::English, DistanceUnit::OverYears(1)) => "over 1 year".to_string(),
            (Self::English, DistanceUnit::OverYears(n)) => format!("over {n} years"),
            (Self::English, DistanceUnit::AlmostYears(1)) => "almost 1 year".to_string(),
            (Self::English, DistanceUnit::AlmostYears(n)) => format!("almost {n} years"),

            (Self::Portuguese, DistanceUnit::LessThanMinute) => "menos de um minuto".to_string(),
            (Self::Portuguese, DistanceUnit::Minutes(1)) => "1 minuto".to_string(),
            (Self::Portuguese, DistanceUnit::Minutes(n)) => format!("{n} minutos"),
            (Self::Portuguese, DistanceUnit::AboutHours(1)) => "cerca de 1 hora".to_string(),
            (Self::Portuguese, DistanceUnit::AboutHours(n)) => format!("cerca de {n} horas"),
            (Self::Portuguese, DistanceUnit::Days(1)) => "1 dia".to_string(),
            (Self::Portuguese, DistanceUnit::Days(n)) => format!("{n} dias"),
            (Self::Portuguese, DistanceUnit::AboutMonths(1)) => "cerca de 1 mês".to_string(),
            (Self::Portuguese, DistanceUnit::AboutMonths(n)) => format!("cerca de {n} meses"),
            (Self::Portuguese, DistanceUnit::Months(1)) => "1 mês".to_string(),
            (Self::Portuguese, DistanceUnit::Months(n)) => format!("{n} meses"),
            (Self::Portuguese, DistanceUnit::AboutYears(1)) => "cerca de 1 ano".to_string(),
            (Self::Portuguese, DistanceUnit::AboutYears(n)) => format!("cerca de {n} anos"),
            (Self::Portuguese, DistanceUnit::OverYears(1)) => "mais de 1 ano".to_string(),
            (Self::Portuguese, DistanceUnit::OverYears(n)) => format!("mais de {n} anos"),
            (Self::Portuguese, DistanceUnit::AlmostYears(1)) => "quase 1 ano".to_string(),
            (Self::Portuguese, DistanceUnit::AlmostYears(n)) => format!("quase {n} anos"),
        }
    }
}

/// Bucket chosen for a time distance, before wording is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DistanceUnit {
    LessThanMinute,
    Minutes(i64),
    AboutHours(i64),
    Days(i64),
    AboutMonths(i64),
    Months(i64),
    AboutYears(i64),
    OverYears(i64),
    AlmostYears(i64),
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "english" => Ok(Self::English),
            "pt" | "pt-br" | "portuguese" => Ok(Self::Portuguese),
            other => Err(Error::InvalidInput(format!("unsupported locale '{other}'"))),
        }
    }
}
