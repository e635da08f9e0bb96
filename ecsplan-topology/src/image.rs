//! Image selection
//!
//! The single decision point for everything that depends on bootstrap mode:
//! which image runs, whether the process command is overridden, and which
//! path the target group health-checks. The three are returned as one value
//! so they cannot diverge; no other module consults the bootstrap flag.

use ecsplan_models::{ImageRef, RegistrySpec};

/// Fixed public image served in bootstrap mode, before any application
/// image exists in the repository.
pub const BOOTSTRAP_IMAGE: &str = "public.ecr.aws/docker/library/httpd:2.4";

/// Tag the externally built application image is pushed under.
pub const APP_IMAGE_TAG: &str = "latest";

/// Health-check path while the bootstrap image is serving.
pub const BOOTSTRAP_HEALTH_PATH: &str = "/";

/// Health-check path of the application image (Spring Boot actuator).
pub const APP_HEALTH_PATH: &str = "/actuator/health";

/// The atomic outcome of image selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSelection {
    pub image: ImageRef,
    pub command: Option<Vec<String>>,
    pub health_check_path: &'static str,
}

/// Select image, command override, and health-check path in one decision.
pub fn select_image(bootstrap_mode: bool, registry: &RegistrySpec) -> ImageSelection {
    if bootstrap_mode {
        ImageSelection {
            image: ImageRef::PublicBootstrap {
                reference: BOOTSTRAP_IMAGE.to_string(),
            },
            command: Some(vec![
                "/bin/sh".to_string(),
                "-c".to_string(),
                "echo 'topology ok' > /usr/local/apache2/htdocs/index.html && httpd-foreground"
                    .to_string(),
            ]),
            health_check_path: BOOTSTRAP_HEALTH_PATH,
        }
    } else {
        ImageSelection {
            image: ImageRef::Registry {
                repository: registry.repository_name.clone(),
                tag: APP_IMAGE_TAG.to_string(),
            },
            command: None,
            health_check_path: APP_HEALTH_PATH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> RegistrySpec {
        RegistrySpec {
            repository_name: "helloecs-repo".to_string(),
        }
    }

    #[test]
    fn bootstrap_selects_public_image_with_override() {
        let selection = select_image(true, &registry());
        assert_eq!(
            selection.image,
            ImageRef::PublicBootstrap {
                reference: BOOTSTRAP_IMAGE.to_string()
            }
        );
        assert!(selection.command.is_some());
        assert_eq!(selection.health_check_path, "/");
    }

    #[test]
    fn app_mode_selects_repository_at_latest() {
        let selection = select_image(false, &registry());
        assert_eq!(
            selection.image,
            ImageRef::Registry {
                repository: "helloecs-repo".to_string(),
                tag: "latest".to_string()
            }
        );
        assert!(selection.command.is_none());
        assert_eq!(selection.health_check_path, "/actuator/health");
    }
}
