//! Common constants used throughout cigen.

/// Directory, relative to the project root, that receives generated files
pub const OUTPUT_DIR: &str = ".ci-generated";

/// Name of the run summary written next to the generated files
pub const REPORT_FILE: &str = "report.txt";

/// Name of the directory holding the bundled templates
pub const TEMPLATES_DIR: &str = "templates";

/// Project name used when no manifest declares one
pub const DEFAULT_PROJECT_NAME: &str = "local-project";

pub const DEFAULT_SONAR_HOST: &str = "http://sonarqube:9000";
pub const DEFAULT_NEXUS_URL: &str = "http://nexus:8081";

/// Environment variables read by [`crate::config::Settings`]
pub mod env {
    pub const REGISTRY_IMAGE: &str = "CI_REGISTRY_IMAGE";
    pub const SONAR_HOST: &str = "SONAR_HOST";
    pub const NEXUS_URL: &str = "NEXUS_URL";
}

/// Placeholder names recognised in every template
pub mod vars {
    pub const BUILD_CMD: &str = "BUILD_CMD";
    pub const TEST_CMD: &str = "TEST_CMD";
    pub const CACHE_DIR: &str = "CACHE_DIR";
    pub const PROJECT_NAME: &str = "PROJECT_NAME";
    pub const IMAGE_NAME: &str = "IMAGE_NAME";
    pub const SONAR_HOST: &str = "SONAR_HOST";
    pub const NEXUS_URL: &str = "NEXUS_URL";
}

/// Detail keys produced by the detector. They double as placeholder names.
pub mod details {
    pub const JAVA_VERSION: &str = "JAVA_VERSION";
    pub const GO_MODULE: &str = "GO_MODULE";
    pub const GO_VERSION: &str = "GO_VERSION";
    pub const PACKAGE_NAME: &str = "PACKAGE_NAME";
    pub const NODE_ENGINE: &str = "NODE_ENGINE";
    pub const NODE_SCRIPTS: &str = "NODE_SCRIPTS";
    pub const PYTHON_REQUIRES: &str = "PYTHON_REQUIRES";
}
