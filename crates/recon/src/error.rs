use std::fmt;

#[derive(Debug)]
pub enum RosterError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (zero timeout, oversized indent, etc.).
    ConfigValidation(String),
    /// Roster document is not a JSON array of organization objects.
    RosterParse(String),
    /// Report CSV could not be read or a row failed to deserialize.
    ReportParse(String),
    /// Required column absent from the report header.
    MissingColumn(String),
    /// Two roster records share the same name.
    DuplicateName(String),
    /// A record expected by name is not in the roster.
    RecordNotFound(String),
    /// A report row expected by account name is not in the report.
    ReportRowNotFound(String),
    /// Roster could not be rendered back to JSON.
    Serialize(String),
    /// IO error (file read, write, etc.).
    Io(String),
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::RosterParse(msg) => write!(f, "roster parse error: {msg}"),
            Self::ReportParse(msg) => write!(f, "report parse error: {msg}"),
            Self::MissingColumn(column) => write!(f, "report is missing column '{column}'"),
            Self::DuplicateName(name) => write!(f, "duplicate organization name '{name}'"),
            Self::RecordNotFound(name) => write!(f, "no organization named '{name}' in roster"),
            Self::ReportRowNotFound(name) => write!(f, "no report row for account '{name}'"),
            Self::Serialize(msg) => write!(f, "cannot serialize roster: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for RosterError {}
