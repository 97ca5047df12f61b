use std::collections::HashSet;

use url::Url;

use crate::config::models::{ApiConfig, ResourceConfig};

/// Validation result type alias
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validation error types
#[derive(Debug, thiserror::Error, Clone)]
pub enum ValidationError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid field '{field}': {message}")]
    InvalidField { field: String, message: String },

    #[error("Duplicate resource name '{name}'")]
    DuplicateResource { name: String },

    #[error("Duplicate endpoint name '{name}' in resource '{resource}'")]
    DuplicateEndpoint { resource: String, name: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },
}

/// Api configuration validator
///
/// Name uniqueness is enforced here rather than silently resolved: a config
/// carrying duplicate resource names, or duplicate endpoint names within one
/// resource, is rejected at construction.
pub struct ApiConfigValidator;

impl ApiConfigValidator {
    /// Validate the entire api configuration
    pub fn validate(config: &ApiConfig) -> ValidationResult<()> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_host(&config.host) {
            errors.push(e);
        }

        let mut resource_names = HashSet::new();
        for resource in &config.resources {
            if !resource_names.insert(resource.name.as_str()) {
                errors.push(ValidationError::DuplicateResource {
                    name: resource.name.clone(),
                });
            }
            if let Err(mut resource_errors) = Self::validate_resource(resource) {
                errors.append(&mut resource_errors);
            }
        }

        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(ValidationError::ValidationFailed {
                message: Self::format_multiple_errors(errors),
            }),
        }
    }

    /// The map-level host must be an absolute URL: the default transport has
    /// no browser origin to resolve a relative path against.
    fn validate_host(host: &str) -> ValidationResult<()> {
        if host.is_empty() {
            return Err(ValidationError::MissingField {
                field: "host".to_string(),
            });
        }
        if Url::parse(host).is_err() {
            return Err(ValidationError::InvalidField {
                field: "host".to_string(),
                message: format!(
                    "'{host}' must be an absolute URL (e.g. 'https://api.example.com')"
                ),
            });
        }
        Ok(())
    }

    /// Validate a single resource declaration
    fn validate_resource(resource: &ResourceConfig) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if resource.name.is_empty() {
            errors.push(ValidationError::MissingField {
                field: "resource.name".to_string(),
            });
        }

        let mut endpoint_names = HashSet::new();
        for endpoint in &resource.endpoints {
            if endpoint.name.is_empty() {
                errors.push(ValidationError::MissingField {
                    field: format!("endpoint.name (resource '{}')", resource.name),
                });
            } else if !endpoint_names.insert(endpoint.name.as_str()) {
                errors.push(ValidationError::DuplicateEndpoint {
                    resource: resource.name.clone(),
                    name: endpoint.name.clone(),
                });
            }
            if endpoint.path.is_empty() {
                errors.push(ValidationError::MissingField {
                    field: format!(
                        "endpoint.path (resource '{}', endpoint '{}')",
                        resource.name, endpoint.name
                    ),
                });
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    fn format_multiple_errors(errors: Vec<ValidationError>) -> String {
        let mut message = format!("Found {} validation errors:\n", errors.len());
        for (i, error) in errors.iter().enumerate() {
            message.push_str(&format!("  {}. {}\n", i + 1, error));
        }
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::models::{EndpointConfig, HttpMethod};

    fn valid_config() -> ApiConfig {
        ApiConfig {
            host: "https://api.test".to_string(),
            resources: vec![ResourceConfig {
                name: "users".to_string(),
                host: "/v1".to_string(),
                endpoints: vec![
                    EndpointConfig::new("list", "/users", HttpMethod::Get),
                    EndpointConfig::new("create", "/users", HttpMethod::Post),
                ],
                ..ResourceConfig::default()
            }],
            ..ApiConfig::default()
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(ApiConfigValidator::validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_empty_host_is_missing_field() {
        let mut config = valid_config();
        config.host = String::new();
        let err = ApiConfigValidator::validate(&config).unwrap_err();
        assert!(matches!(err, ValidationError::MissingField { .. }));
    }

    #[test]
    fn test_relative_host_is_invalid() {
        let mut config = valid_config();
        config.host = "/just/a/path".to_string();
        let err = ApiConfigValidator::validate(&config).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidField { .. }));
    }

    #[test]
    fn test_duplicate_endpoint_names_are_rejected() {
        let mut config = valid_config();
        config.resources[0]
            .endpoints
            .push(EndpointConfig::new("list", "/users/all", HttpMethod::Get));
        let err = ApiConfigValidator::validate(&config).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::DuplicateEndpoint { ref name, .. } if name == "list"
        ));
    }

    #[test]
    fn test_multiple_errors_are_aggregated() {
        let mut config = valid_config();
        config.host = String::new();
        config.resources.push(config.resources[0].clone());
        let err = ApiConfigValidator::validate(&config).unwrap_err();
        match err {
            ValidationError::ValidationFailed { message } => {
                assert!(message.contains("validation errors"));
                assert!(message.contains("host"));
                assert!(message.contains("users"));
            }
            other => panic!("expected aggregated failure, got {other:?}"),
        }
    }
}
