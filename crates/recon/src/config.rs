use serde::Deserialize;

use crate::error::ReconError;
use crate::model::Dimension;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub report: GroupingConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            input: InputConfig::default(),
            report: GroupingConfig::default(),
        }
    }
}

fn default_name() -> String {
    "Inventory Discrepancy".into()
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    #[serde(default)]
    pub encoding: InputEncoding,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            encoding: InputEncoding::default(),
            delimiter: default_delimiter(),
        }
    }
}

impl InputConfig {
    /// The delimiter as the single byte the CSV reader wants.
    pub fn delimiter_byte(&self) -> Result<u8, ReconError> {
        match self.delimiter.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(ReconError::ConfigValidation(format!(
                "delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            ))),
        }
    }
}

fn default_delimiter() -> String {
    ",".into()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputEncoding {
    /// ISO-8859-1: every byte maps to the code point of the same value.
    #[default]
    Latin1,
    Windows1252,
    Utf8,
}

impl std::str::FromStr for InputEncoding {
    type Err = ReconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "latin1" | "latin-1" | "iso-8859-1" => Ok(Self::Latin1),
            "windows1252" | "windows-1252" | "cp1252" => Ok(Self::Windows1252),
            "utf8" | "utf-8" => Ok(Self::Utf8),
            other => Err(ReconError::ConfigValidation(format!("unknown encoding '{other}'"))),
        }
    }
}

impl std::fmt::Display for InputEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Latin1 => write!(f, "latin1"),
            Self::Windows1252 => write!(f, "windows1252"),
            Self::Utf8 => write!(f, "utf8"),
        }
    }
}

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct GroupingConfig {
    #[serde(default = "default_group_by")]
    pub group_by: Vec<Dimension>,
    /// Chart x-axis. Defaults to the first grouped column.
    #[serde(default)]
    pub display_by: Option<Dimension>,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            group_by: default_group_by(),
            display_by: None,
        }
    }
}

impl GroupingConfig {
    pub fn display_column(&self) -> Option<Dimension> {
        self.display_by.or_else(|| self.group_by.first().copied())
    }
}

fn default_group_by() -> Vec<Dimension> {
    Dimension::DEFAULT_GROUPING.to_vec()
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReportConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReportConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        self.input.delimiter_byte()?;
        validate_selection(&self.report.group_by)?;

        if let Some(display) = self.report.display_by {
            if !self.report.group_by.contains(&display) {
                return Err(ReconError::DisplayNotGrouped(display.to_string()));
            }
        }

        Ok(())
    }
}

/// A grouping selection must name at least one column, each at most once.
pub fn validate_selection(dimensions: &[Dimension]) -> Result<(), ReconError> {
    if dimensions.is_empty() {
        return Err(ReconError::ConfigValidation(
            "at least one grouping column is required".into(),
        ));
    }
    for (i, dim) in dimensions.iter().enumerate() {
        if dimensions[..i].contains(dim) {
            return Err(ReconError::ConfigValidation(format!(
                "grouping column '{dim}' selected more than once"
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
name = "Store 12 cycle count"

[input]
encoding = "windows1252"
delimiter = ";"

[report]
group_by = ["Retail_Product_Color", "SKUSide"]
display_by = "SKUSide"
"#;

    #[test]
    fn parse_full() {
        let config = ReportConfig::from_toml(FULL).unwrap();
        assert_eq!(config.name, "Store 12 cycle count");
        assert_eq!(config.input.encoding, InputEncoding::Windows1252);
        assert_eq!(config.input.delimiter_byte().unwrap(), b';');
        assert_eq!(config.report.group_by, vec![Dimension::Color, Dimension::SkuSide]);
        assert_eq!(config.report.display_column(), Some(Dimension::SkuSide));
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = ReportConfig::from_toml("").unwrap();
        assert_eq!(config.name, "Inventory Discrepancy");
        assert_eq!(config.input.encoding, InputEncoding::Latin1);
        assert_eq!(config.input.delimiter, ",");
        assert_eq!(config.report.group_by, Dimension::DEFAULT_GROUPING.to_vec());
        assert_eq!(config.report.display_column(), Some(Dimension::Level1Name));
    }

    #[test]
    fn reject_unknown_column() {
        let err = ReportConfig::from_toml("[report]\ngroup_by = [\"Retail_SOHQTY\"]\n").unwrap_err();
        assert!(matches!(err, ReconError::ConfigParse(_)));
    }

    #[test]
    fn reject_empty_grouping() {
        let err = ReportConfig::from_toml("[report]\ngroup_by = []\n").unwrap_err();
        assert!(err.to_string().contains("at least one grouping column"));
    }

    #[test]
    fn reject_repeated_grouping() {
        let input = r#"
[report]
group_by = ["Retail_Product_Color", "Retail_Product_Color"]
"#;
        let err = ReportConfig::from_toml(input).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn reject_display_outside_grouping() {
        let input = r#"
[report]
group_by = ["Retail_Product_Color"]
display_by = "Retail_Product_Size"
"#;
        let err = ReportConfig::from_toml(input).unwrap_err();
        assert!(matches!(err, ReconError::DisplayNotGrouped(_)));
    }

    #[test]
    fn reject_multichar_delimiter() {
        let err = ReportConfig::from_toml("[input]\ndelimiter = \"::\"\n").unwrap_err();
        assert!(err.to_string().contains("single ASCII character"));
    }

    #[test]
    fn encoding_labels() {
        assert_eq!("ISO-8859-1".parse::<InputEncoding>().unwrap(), InputEncoding::Latin1);
        assert_eq!("cp1252".parse::<InputEncoding>().unwrap(), InputEncoding::Windows1252);
        assert!("ebcdic".parse::<InputEncoding>().is_err());
    }
}
