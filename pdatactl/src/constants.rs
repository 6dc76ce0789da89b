// =============================================================================
// Application Identity
// =============================================================================

/// Application name (for paths, identifiers and the default log filter)
pub const APP_NAME: &str = "pdatactl";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file looked up in the working directory when none is given
pub const CONFIG_FILE_NAME: &str = "pdatactl.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "PDATACTL_CONFIG";

// =============================================================================
// Environment Variables
// =============================================================================

/// Environment variable for the log filter
pub const ENV_LOG: &str = "PDATACTL_LOG";

/// Environment variable for the default wire format
pub const ENV_FORMAT: &str = "PDATACTL_FORMAT";

/// Path meaning standard input or output
pub const STDIO_PATH: &str = "-";
