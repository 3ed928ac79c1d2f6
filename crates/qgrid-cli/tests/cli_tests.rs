//! CLI argument parsing and end-to-end tests.
//!
//! Parsing is checked through a mirror of the clap structs (main.rs is a
//! binary); behaviour is checked by running the built `qgrid` binary.

// ============================================================================
// Clap argument parsing (test via try_parse_from on equivalent structs)
// ============================================================================

mod clap_parsing {
    use clap::{Parser, Subcommand};
    use std::path::PathBuf;

    // Mirror the CLI struct for testing (since main.rs is a binary)
    #[derive(Parser)]
    #[command(name = "qgrid")]
    struct TestCli {
        #[arg(short, long, action = clap::ArgAction::Count, global = true)]
        verbose: u8,

        #[arg(short, long, global = true)]
        config: Option<PathBuf>,

        #[command(subcommand)]
        command: TestCommands,
    }

    #[derive(Subcommand)]
    enum TestCommands {
        Simulate {
            #[arg(short, long)]
            input: String,
            #[arg(short, long)]
            output: Option<String>,
            #[arg(long)]
            pretty: bool,
        },
        Inspect {
            #[arg(short, long)]
            input: String,
        },
        Version,
    }

    #[test]
    fn test_parse_simulate_minimal() {
        let cli = TestCli::try_parse_from(["qgrid", "simulate", "-i", "req.json"]).unwrap();
        match cli.command {
            TestCommands::Simulate {
                input,
                output,
                pretty,
            } => {
                assert_eq!(input, "req.json");
                assert!(output.is_none());
                assert!(!pretty);
            }
            _ => panic!("Expected Simulate command"),
        }
    }

    #[test]
    fn test_parse_simulate_with_all_args() {
        let cli = TestCli::try_parse_from([
            "qgrid",
            "simulate",
            "--input",
            "-",
            "-o",
            "out.json",
            "--pretty",
            "--config",
            "qgrid.yaml",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("qgrid.yaml")));
        match cli.command {
            TestCommands::Simulate {
                input,
                output,
                pretty,
            } => {
                assert_eq!(input, "-");
                assert_eq!(output.as_deref(), Some("out.json"));
                assert!(pretty);
            }
            _ => panic!("Expected Simulate command"),
        }
    }

    #[test]
    fn test_parse_simulate_missing_input() {
        assert!(TestCli::try_parse_from(["qgrid", "simulate"]).is_err());
    }

    #[test]
    fn test_parse_inspect() {
        let cli = TestCli::try_parse_from(["qgrid", "inspect", "-i", "req.json"]).unwrap();
        assert!(matches!(cli.command, TestCommands::Inspect { input } if input == "req.json"));
    }

    #[test]
    fn test_parse_verbose_vv() {
        let cli = TestCli::try_parse_from(["qgrid", "-vv", "version"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_no_subcommand() {
        assert!(TestCli::try_parse_from(["qgrid"]).is_err());
    }

    #[test]
    fn test_unknown_subcommand() {
        assert!(TestCli::try_parse_from(["qgrid", "compile"]).is_err());
    }
}

// ============================================================================
// Binary tests
// ============================================================================

mod binary {
    use serde_json::{Value, json};
    use std::io::Write;
    use std::process::{Command, Output, Stdio};
    use tempfile::NamedTempFile;

    fn qgrid() -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_qgrid"));
        // keep the user's environment from leaking into tests
        for key in [
            "QGRID_CONFIG",
            "QGRID_MAX_WIRES",
            "QGRID_DEADLINE_MS",
            "QGRID_LOG_LEVEL",
            "QGRID_LOG_FORMAT",
        ] {
            cmd.env_remove(key);
        }
        cmd
    }

    fn request_file(body: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    fn stdout_json(output: &Output) -> Value {
        serde_json::from_slice(&output.stdout).unwrap()
    }

    #[test]
    fn test_simulate_file() {
        let file = request_file(
            r#"{"circuit": {"gates": [["X", "M"], ["H", "M"]]}, "to_measure": [{"qubit": 0, "toggle": 1}]}"#,
        );
        let output = qgrid()
            .args(["simulate", "-i"])
            .arg(file.path())
            .output()
            .unwrap();

        assert!(output.status.success());
        let response = stdout_json(&output);
        assert_eq!(response["status"], "ok");
        let dist = response["state_vector"].as_array().unwrap();
        assert_eq!(dist.len(), 2);
        assert!(dist[0].as_f64().unwrap().abs() < 1e-9);
        assert!((dist[1].as_f64().unwrap() - 1.0).abs() < 1e-9);

        let probes = response["probed_values"].as_array().unwrap();
        assert_eq!(probes.len(), 2);
        assert_eq!(probes[0]["row"], 0);
        assert_eq!(probes[0]["col"], 1);
        assert!((probes[0]["value"].as_f64().unwrap() - 1.0).abs() < 1e-9);
        assert_eq!(probes[1]["row"], 1);
        assert!((probes[1]["value"].as_f64().unwrap() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_simulate_stdin() {
        let mut child = qgrid()
            .args(["simulate", "-i", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap();
        child
            .stdin
            .take()
            .unwrap()
            .write_all(br#"{"circuit": {"gates": [["X", "M"], ["Z", 0]]}}"#)
            .unwrap();
        let output = child.wait_with_output().unwrap();

        assert!(output.status.success());
        assert_eq!(
            stdout_json(&output),
            json!({
                "status": "ok",
                "state_vector": [1.0],
                "probed_values": [{"row": 0, "col": 1, "value": 1.0}]
            })
        );
    }

    #[test]
    fn test_simulate_malformed_request() {
        let file = request_file(r#"{"circuit": [}"#);
        let output = qgrid()
            .args(["simulate", "-i"])
            .arg(file.path())
            .output()
            .unwrap();

        assert!(!output.status.success());
        let response = stdout_json(&output);
        assert_eq!(response["status"], "error");
        assert!(response.get("state_vector").is_none());
        assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
    }

    #[test]
    fn test_simulate_to_output_file() {
        let file = request_file(
            r#"{"circuit": {"gates": [["H"]]}, "to_measure": [{"qubit": 0, "toggle": 1}]}"#,
        );
        let out = NamedTempFile::new().unwrap();
        let output = qgrid()
            .args(["simulate", "--pretty", "-i"])
            .arg(file.path())
            .arg("-o")
            .arg(out.path())
            .output()
            .unwrap();

        assert!(output.status.success());
        assert!(output.stdout.is_empty());
        let written: Value =
            serde_json::from_str(&std::fs::read_to_string(out.path()).unwrap()).unwrap();
        let dist = written["state_vector"].as_array().unwrap();
        assert!((dist[0].as_f64().unwrap() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_config_limits_wires() {
        let config = request_file("engine:\n  max_wires: 1\n");
        let file = request_file(r#"{"circuit": {"gates": [["H"], ["H"]]}}"#);
        let output = qgrid()
            .arg("--config")
            .arg(config.path())
            .args(["simulate", "-i"])
            .arg(file.path())
            .output()
            .unwrap();

        assert!(!output.status.success());
        let response = stdout_json(&output);
        assert_eq!(response["status"], "error");
        assert!(response["message"].as_str().unwrap().contains("at most 1"));
    }

    #[test]
    fn test_invalid_config_fails_early() {
        let config = request_file("logging:\n  level: loud\n");
        let output = qgrid()
            .arg("--config")
            .arg(config.path())
            .arg("version")
            .output()
            .unwrap();

        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid log level"));
    }

    #[test]
    fn test_missing_input_file() {
        let output = qgrid()
            .args(["simulate", "-i", "/nonexistent/request.json"])
            .output()
            .unwrap();
        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("File not found"));
    }

    #[test]
    fn test_inspect() {
        let file = request_file(r#"{"circuit": {"gates": [["X", "b", "M"], ["sw", "b", "0"]]}}"#);
        let output = qgrid()
            .args(["inspect", "-i"])
            .arg(file.path())
            .output()
            .unwrap();

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("2 wires, 3 columns (2 emitted)"));
        assert!(stdout.contains("probe(w0)"));
        assert!(stdout.contains("unpaired swap"));
    }

    #[test]
    fn test_version() {
        let output = qgrid().arg("version").output().unwrap();
        assert!(output.status.success());
        assert!(String::from_utf8_lossy(&output.stdout).contains("qgrid"));
    }
}
