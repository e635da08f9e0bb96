//! Derived resource names
//!
//! Single source of truth for every name in the graph. All names are
//! deterministic functions of the application name, so re-deriving from the
//! same parameters always addresses the same resources.

pub fn vpc(app: &str) -> String {
    format!("{}-vpc", app)
}

pub fn cluster(app: &str) -> String {
    format!("{}-cluster", app)
}

pub fn repository(app: &str) -> String {
    format!("{}-repo", app)
}

pub fn service(app: &str) -> String {
    format!("{}-service", app)
}

pub fn load_balancer(app: &str) -> String {
    format!("{}-alb", app)
}

pub fn target_group(app: &str) -> String {
    format!("{}-tg", app)
}

pub fn alb_boundary(app: &str) -> String {
    format!("{}-alb-sg", app)
}

pub fn service_boundary(app: &str) -> String {
    format!("{}-service-sg", app)
}

pub fn task_family(app: &str) -> String {
    format!("{}-task", app)
}

pub fn execution_role(app: &str) -> String {
    format!("{}-execution-role", app)
}

/// Log group name, following the `/ecs/<app>` convention.
pub fn log_group(app: &str) -> String {
    format!("/ecs/{}", app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_follow_app_name() {
        assert_eq!(cluster("helloecs"), "helloecs-cluster");
        assert_eq!(repository("helloecs"), "helloecs-repo");
        assert_eq!(service("helloecs"), "helloecs-service");
        assert_eq!(load_balancer("helloecs"), "helloecs-alb");
        assert_eq!(log_group("helloecs"), "/ecs/helloecs");
    }
}
