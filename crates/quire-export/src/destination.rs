//! Export destinations

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Destination {
    /// Markdown file download
    File,
    /// Word-processor document
    Document,
    /// Print view
    Print,
}

impl Destination {
    pub fn as_str(&self) -> &'static str {
        match self {
            Destination::File => "file",
            Destination::Document => "document",
            Destination::Print => "print",
        }
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Destination {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" | "md" | "markdown" => Ok(Destination::File),
            "document" | "docx" => Ok(Destination::Document),
            "print" => Ok(Destination::Print),
            _ => Err(format!("Unknown export destination: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("md".parse::<Destination>(), Ok(Destination::File));
        assert_eq!("DOCX".parse::<Destination>(), Ok(Destination::Document));
        assert_eq!("print".parse::<Destination>(), Ok(Destination::Print));
        assert!("pdf".parse::<Destination>().is_err());
    }
}
