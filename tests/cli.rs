mod cli {
    #![allow(non_snake_case)]

    use assert_cmd::prelude::*;
    use mockito::Server;
    use predicates::str::contains;

    use std::fs;
    use std::io::Write;
    use std::process::Command;
    use tempfile::NamedTempFile;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    const DESCRIBE: &str = "webstack-describe";
    const LINKCHECK: &str = "webstack-linkcheck";
    const LOGO: &str = "webstack-logo";

    fn dataset_file(links: &[(&str, &str)]) -> Result<NamedTempFile, std::io::Error> {
        let mut yaml = String::from("- taxonomy: 常用推荐\n  list:\n  - term: 开发工具\n    links:\n");
        for (title, url) in links {
            yaml.push_str(&format!(
                "    - title: {title}\n      url: {url}\n      logo: null\n      description: null\n"
            ));
        }
        let mut file = NamedTempFile::new()?;
        file.write_all(yaml.as_bytes())?;
        Ok(file)
    }

    #[test]
    fn test_linkcheck__missing_dataset_fails() -> TestResult {
        let mut cmd = Command::cargo_bin(LINKCHECK)?;

        cmd.args(["--no-config", "--webstack", "/definitely/not/here.yml"]);

        cmd.assert()
            .failure()
            .stderr(contains("Error: File not found: /definitely/not/here.yml"));
        Ok(())
    }

    #[test]
    fn test_linkcheck__empty_dataset_fails() -> TestResult {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"[]\n")?;
        let mut cmd = Command::cargo_bin(LINKCHECK)?;

        cmd.arg("--no-config").arg("--webstack").arg(file.path());

        cmd.assert()
            .failure()
            .stderr(contains("No links found in the dataset"));
        Ok(())
    }

    #[tokio::test]
    async fn test_linkcheck__all_links_ok_writes_markdown_report() -> TestResult {
        let mut server = Server::new_async().await;
        let _ok = server.mock("GET", "/ok").with_status(200).create_async().await;
        let url = format!("{}/ok", server.url());
        let file = dataset_file(&[("Home", &url)])?;
        let out_dir = tempfile::tempdir()?;
        let report = out_dir.path().join("nested/report.md");
        let mut cmd = Command::cargo_bin(LINKCHECK)?;

        cmd.arg("--no-config")
            .arg("-q")
            .arg("--webstack")
            .arg(file.path())
            .arg("--output")
            .arg(&report);

        cmd.assert().success();
        let content = fs::read_to_string(&report)?;
        assert!(content.starts_with("# Link Check Report"));
        assert!(content.contains("- **Total links**: 1"));
        assert!(!content.contains("## ❌ Failed Links"));
        Ok(())
    }

    #[tokio::test]
    async fn test_linkcheck__broken_link_exits_1_with_json_report() -> TestResult {
        let mut server = Server::new_async().await;
        let _missing = server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;
        let url = format!("{}/missing", server.url());
        let file = dataset_file(&[("Gone", &url)])?;
        let out_dir = tempfile::tempdir()?;
        let report = out_dir.path().join("report.json");
        let mut cmd = Command::cargo_bin(LINKCHECK)?;

        cmd.arg("--no-config")
            .arg("--no-progress")
            .arg("--failed-only")
            .arg("--webstack")
            .arg(file.path())
            .args(["--format", "json", "--output"])
            .arg(&report);

        cmd.assert()
            .code(1)
            .stdout(contains("Gone - "))
            .stdout(contains("HTTP 404"));

        let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report)?)?;
        assert_eq!(json["metadata"]["total_links"], 1);
        assert_eq!(json["failed_links"][0]["title"], "Gone");
        assert_eq!(json["failed_links"][0]["status"], "http_error");
        Ok(())
    }

    #[tokio::test]
    async fn test_describe__fills_missing_description() -> TestResult {
        let mut server = Server::new_async().await;
        let _page = server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(
                r#"<html><head><title>Mock</title>
<meta name="description" content="A mock site used for integration testing">
</head><body></body></html>"#,
            )
            .create_async()
            .await;
        let file = dataset_file(&[("Mock", &server.url())])?;
        let mut cmd = Command::cargo_bin(DESCRIBE)?;

        cmd.args(["--no-config", "-q", "-r", "0", "-f"]).arg(file.path());

        cmd.assert().success();
        let saved = fs::read_to_string(file.path())?;
        assert!(saved.contains("description: A mock site used for integration testing"));
        assert!(saved.contains("logo: null"));
        assert!(saved.contains("taxonomy: 常用推荐"));
        Ok(())
    }

    #[tokio::test]
    async fn test_describe__test_url_prints_description() -> TestResult {
        let mut server = Server::new_async().await;
        let _page = server
            .mock("GET", "/")
            .with_status(200)
            .with_body(r#"<html><head><meta property="og:description" content="Open graph text for the page"></head></html>"#)
            .create_async()
            .await;
        let mut cmd = Command::cargo_bin(DESCRIBE)?;

        cmd.args(["--no-config", "-r", "0", "--test-url"])
            .arg(server.url());

        cmd.assert()
            .success()
            .stdout(contains("✓ Open graph text for the page"));
        Ok(())
    }

    #[test]
    fn test_logo__scan_lists_entries_without_logo() -> TestResult {
        let file = dataset_file(&[("GitHub", "https://www.github.com"), ("Gitee", "https://gitee.com")])?;
        let mut cmd = Command::cargo_bin(LOGO)?;

        cmd.args(["scan", "--no-config", "--webstack"]).arg(file.path());

        cmd.assert()
            .success()
            .stdout(contains("📋 2 site(s) without a logo:"))
            .stdout(contains("   1. GitHub (github.com)"))
            .stdout(contains("   2. Gitee (gitee.com)"));
        Ok(())
    }

    #[test]
    fn test_logo__report_writes_markdown() -> TestResult {
        let file = dataset_file(&[("Gitee", "https://gitee.com")])?;
        let out_dir = tempfile::tempdir()?;
        let report = out_dir.path().join("logos.md");
        let mut cmd = Command::cargo_bin(LOGO)?;

        cmd.args(["report", "--no-config", "--webstack"])
            .arg(file.path())
            .arg("--output")
            .arg(&report);

        cmd.assert().success().stdout(contains("📄 Report saved to:"));
        let content = fs::read_to_string(&report)?;
        assert!(content.contains("## 常用推荐"));
        assert!(content.contains("- ❌ **Gitee** - https://gitee.com"));
        assert!(content.contains("- Missing logo: 1 (100.0%)"));
        Ok(())
    }

    #[test]
    fn test_logo__get_without_target_fails() -> TestResult {
        let mut cmd = Command::cargo_bin(LOGO)?;

        cmd.arg("get");

        cmd.assert().failure().stderr(contains("<TARGET>"));
        Ok(())
    }

    #[tokio::test]
    async fn test_logo__check_reports_quality() -> TestResult {
        let mut server = Server::new_async().await;
        let _icon = server
            .mock("HEAD", "/favicon.png")
            .with_status(200)
            .with_header("content-type", "image/png")
            .create_async()
            .await;
        let mut cmd = Command::cargo_bin(LOGO)?;

        cmd.args(["check", "--no-config"])
            .arg(format!("{}/favicon.png", server.url()));

        cmd.assert()
            .success()
            .stdout(contains("✅ Logo available:"))
            .stdout(contains("📊 Type: image/png"));
        Ok(())
    }

    #[tokio::test]
    async fn test_logo__get_hq_prints_quality_of_selected_icon() -> TestResult {
        let mut server = Server::new_async().await;
        let _icon = server
            .mock("HEAD", "/icons/gitee.com.png")
            .with_status(200)
            .with_header("content-type", "image/png")
            .with_header("content-length", "300")
            .expect_at_least(1)
            .create_async()
            .await;
        let mut config = NamedTempFile::new()?;
        writeln!(
            config,
            "favicon_templates = [\"{}/icons/{{domain}}.png\"]",
            server.url()
        )?;
        let mut cmd = Command::cargo_bin(LOGO)?;

        cmd.args(["get-hq", "https://www.gitee.com/explore", "--config"])
            .arg(config.path());

        cmd.assert()
            .success()
            .stdout(contains(format!("🎯 Result: {}/icons/gitee.com.png", server.url())))
            .stdout(contains("📊 Type: image/png (300B)"))
            .stdout(contains("🏆 Quality: low"))
            .stdout(contains("File is very small"));
        Ok(())
    }
}
