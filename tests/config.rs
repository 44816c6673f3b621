// ABOUTME: Integration tests for configuration parsing and validation.
// ABOUTME: Tests YAML parsing, cross-reference checks, and destination merging.

use std::time::Duration;
use stolos::config::{CommandValue, Config};

mod parsing {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let yaml = r#"
cluster: production
task_definitions:
  - family: web
    containers:
      - name: app
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.cluster, "production");
        assert_eq!(config.task_definitions.len(), 1);
        assert_eq!(config.wait_time, Duration::from_secs(300));
        assert!(config.one_off_commands.is_empty());
        assert!(config.services.is_empty());
    }

    #[test]
    fn parse_full_config() {
        let yaml = r#"
cluster: production
wait_time: 5m

api:
  endpoint: https://controller.example.com
  token_env: DEPLOY_TOKEN

task_definitions:
  - family: web
    containers:
      - name: app
        image: ghcr.io/org/app:v1.2.3
        env:
          RAILS_ENV: production
        cpu: 256
        memory: 512
        essential: true
      - name: sidecar

one_off_commands:
  - task_family: web
    command: ["rake", "db:migrate"]

services:
  - name: web
    task_family: web
    desired_count: 3
    deployment_configuration:
      maximum_percent: 200
      minimum_healthy_percent: 50
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.wait_time, Duration::from_secs(300));
        assert_eq!(config.token_env(), "DEPLOY_TOKEN");

        let web = config.task_definitions.first();
        assert_eq!(web.family.as_str(), "web");
        assert_eq!(web.container_definitions.len(), 2);
        assert_eq!(
            web.container_definitions[0].env.get("RAILS_ENV"),
            Some(&"production".to_string())
        );
        assert!(web.container_definitions[1].image.is_none());

        assert_eq!(config.services[0].desired_count, 3);
        let deployment = config.services[0].deployment_configuration.as_ref().unwrap();
        assert_eq!(deployment["maximum_percent"], 200);
    }

    #[test]
    fn command_accepts_single_string() {
        let yaml = r#"
cluster: production
task_definitions:
  - family: web
    containers:
      - name: app
one_off_commands:
  - task_family: web
    command: rake db:migrate
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(
            config.one_off_commands[0].command,
            CommandValue::Line("rake db:migrate".to_string())
        );
        assert_eq!(
            config.one_off_commands[0].command.to_argv(),
            vec!["rake".to_string(), "db:migrate".to_string()]
        );
    }

    #[test]
    fn command_accepts_argument_sequence() {
        let command = CommandValue::Argv(vec!["rake".into(), "db:migrate".into()]);
        assert_eq!(command.to_argv(), vec!["rake", "db:migrate"]);
    }

    #[test]
    fn missing_cluster_returns_error() {
        let yaml = r#"
task_definitions:
  - family: web
    containers:
      - name: app
"#;
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("cluster"));
    }

    #[test]
    fn empty_task_definitions_returns_error() {
        let yaml = r#"
cluster: production
task_definitions: []
"#;
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(
            err.to_string()
                .contains("at least one task definition is required")
        );
    }

    #[test]
    fn invalid_family_name_returns_error() {
        let yaml = r#"
cluster: production
task_definitions:
  - family: "bad family!"
    containers:
      - name: app
"#;
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("family"));
    }
}

mod validation {
    use super::*;

    #[test]
    fn duplicate_family_is_rejected() {
        let yaml = r#"
cluster: production
task_definitions:
  - family: web
    containers:
      - name: app
  - family: web
    containers:
      - name: app
"#;
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("duplicate task definition family"));
    }

    #[test]
    fn template_without_containers_is_rejected() {
        let yaml = r#"
cluster: production
task_definitions:
  - family: web
    containers: []
"#;
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("declares no containers"));
    }

    #[test]
    fn one_off_command_with_unknown_family_is_rejected() {
        let yaml = r#"
cluster: production
task_definitions:
  - family: web
    containers:
      - name: app
one_off_commands:
  - task_family: worker
    command: ["true"]
"#;
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("unknown task family: worker"));
    }

    #[test]
    fn service_with_unknown_family_is_rejected() {
        let yaml = r#"
cluster: production
task_definitions:
  - family: web
    containers:
      - name: app
services:
  - name: worker
    task_family: worker
    desired_count: 1
"#;
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("unknown task family: worker"));
    }
}

mod destinations {
    use super::*;

    fn config_with_destinations() -> Config {
        Config::from_yaml(
            r#"
cluster: staging
wait_time: 1m
task_definitions:
  - family: web
    containers:
      - name: app
destinations:
  production:
    cluster: production
    wait_time: 10m
  slow:
    wait_time: 30m
"#,
        )
        .unwrap()
    }

    #[test]
    fn destination_overrides_cluster_and_wait_time() {
        let config = config_with_destinations().for_destination("production").unwrap();
        assert_eq!(config.cluster, "production");
        assert_eq!(config.wait_time, Duration::from_secs(600));
    }

    #[test]
    fn destination_keeps_unspecified_fields() {
        let config = config_with_destinations().for_destination("slow").unwrap();
        assert_eq!(config.cluster, "staging");
        assert_eq!(config.wait_time, Duration::from_secs(1800));
    }

    #[test]
    fn unknown_destination_returns_error() {
        let err = config_with_destinations()
            .for_destination("nope")
            .unwrap_err();
        assert!(err.to_string().contains("unknown destination: nope"));
    }
}

mod discovery {
    use super::*;
    use std::fs;

    const MINIMAL: &str = r#"
cluster: production
task_definitions:
  - family: web
    containers:
      - name: app
"#;

    #[test]
    fn discovers_stolos_yml() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("stolos.yml"), MINIMAL).unwrap();

        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.cluster, "production");
    }

    #[test]
    fn discovers_dotted_directory_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(".stolos")).unwrap();
        fs::write(dir.path().join(".stolos/config.yml"), MINIMAL).unwrap();

        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.cluster, "production");
    }

    #[test]
    fn missing_config_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::discover(dir.path()).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
