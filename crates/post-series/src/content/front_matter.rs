use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

static TOML_REGEX: OnceLock<Regex> = OnceLock::new();

fn toml_regex() -> &'static Regex {
    TOML_REGEX.get_or_init(|| {
        let pattern = r"^[[:space:]]*\+\+\+(\r?\n(?s).*?(?-s))\+\+\+[[:space:]]*(?:$|(?:\r?\n((?s).*(?-s))$))";
        Regex::new(pattern).expect("failed to compile regex for TOML front matter")
    })
}

#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("missing `+++` delimited front matter")]
    Missing,

    #[error("{0}")]
    Invalid(#[from] toml::de::Error),
}

#[derive(Debug)]
pub struct RawTomlFrontMatter<'a>(&'a str);

impl RawTomlFrontMatter<'_> {
    fn deserialize<T>(&self) -> Result<T, toml::de::Error>
    where
        T: serde::de::DeserializeOwned,
    {
        toml::from_str(self.0)
    }
}

/// Splits `content` into its deserialized front matter and the remaining body.
pub fn parse_front_matter<T>(content: &str) -> Result<(T, &str), FrontMatterError>
where
    T: serde::de::DeserializeOwned,
{
    let captures = toml_regex()
        .captures(content)
        .ok_or(FrontMatterError::Missing)?;

    let front_matter = RawTomlFrontMatter(captures.get(1).map_or("", |m| m.as_str()));
    let body = captures.get(2).map_or("", |m| m.as_str());

    Ok((front_matter.deserialize()?, body))
}

pub fn from_toml_datetime<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use std::str::FromStr;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum DatetimeOrString {
        Datetime(toml::value::Datetime),
        String(String),
    }

    match DatetimeOrString::deserialize(deserializer)? {
        DatetimeOrString::Datetime(datetime) => Ok(Some(datetime.to_string())),
        DatetimeOrString::String(string) => match toml::value::Datetime::from_str(&string) {
            Ok(datetime) => Ok(Some(datetime.to_string())),
            Err(err) => Err(D::Error::custom(err)),
        },
    }
}
