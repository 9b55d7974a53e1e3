/// Loading snapshots and configuration from files on disk
use habit_progress::mcp::McpServer;
use habit_progress::*;
use serde_json::{json, Value};
use std::io::Write;
use tempfile::NamedTempFile;

const EXPORT: &str = r#"{
    "habits": [
        { "id": "run", "name": "Run" },
        { "id": "read", "name": "" }
    ],
    "records": [
        { "habitId": "run", "date": "2024-02-27", "completed": true },
        { "habitId": "run", "date": "2024-02-28", "completed": true },
        { "habitId": "run", "date": "2024-02-29", "completed": true },
        { "habitId": "run", "date": "2024-03-01", "completed": true },
        { "habitId": "read", "date": "2024-02-10", "completed": true }
    ]
}"#;

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes()).expect("Failed to write temp file");
    file
}

fn day(s: &str) -> DayId {
    s.parse().expect("valid day")
}

#[cfg(test)]
mod snapshot_file_tests {
    use super::*;

    #[test]
    fn test_preload_snapshot_from_file() {
        let file = write_temp(EXPORT);
        let mut server = ProgressServer::new(EngineConfig::default())
            .expect("Failed to create server")
            .with_today(day("2024-03-01"));

        server.load_from(&JsonFileSource::new(file.path())).expect("snapshot loads");
        assert_eq!(server.snapshot().habits.len(), 2);
        assert_eq!(server.index().habit_count(), 2);

        // Streak runs across the leap day
        let run = HabitId::from("run");
        assert_eq!(current_streak(&run, server.today(), server.index()), 4);

        let report = server
            .analytics()
            .report(&server.snapshot().habits, server.index(), ViewMode::Month, day("2024-02-15"), server.today())
            .expect("report");
        assert_eq!(report.days, 29);
        // 3 + 1 completions over 2 habits x 29 days
        assert_eq!(report.completion_rate, 7);
        assert_eq!(report.habits[1].name, "Untitled habit");
    }

    #[test]
    fn test_broken_export_keeps_previous_snapshot() {
        let good = write_temp(EXPORT);
        let bad = write_temp(r#"{"records":[{"habitId":"run","date":"2024-2-1","completed":true}]}"#);

        let mut server = ProgressServer::new(EngineConfig::default()).expect("Failed to create server");
        server.load_from(&JsonFileSource::new(good.path())).expect("snapshot loads");

        let result = server.load_from(&JsonFileSource::new(bad.path()));
        assert!(matches!(result, Err(ServerError::Snapshot(SnapshotError::Parse(_)))));
        assert_eq!(server.snapshot().habits.len(), 2);
    }

    #[tokio::test]
    async fn test_snapshot_load_tool_reads_path() {
        let file = write_temp(EXPORT);
        let progress = ProgressServer::new(EngineConfig::default())
            .expect("Failed to create server")
            .with_today(day("2024-03-01"));
        let mut server = McpServer::new(progress);

        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/call",
            "params": {
                "name": "snapshot_load",
                "arguments": { "path": file.path().to_string_lossy() }
            }
        });
        let response = server.process_line(&request.to_string()).await.expect("response");
        let value: Value = serde_json::to_value(response).expect("serializes");
        assert_eq!(value["result"]["isError"], Value::Bool(false));
        assert_eq!(server.progress().snapshot().records.len(), 5);

        let missing = json!({
            "jsonrpc": "2.0",
            "id": 2,
            "method": "tools/call",
            "params": {
                "name": "snapshot_load",
                "arguments": { "path": "/nonexistent/export.json" }
            }
        });
        let response = server.process_line(&missing.to_string()).await.expect("response");
        assert_eq!(response.error.map(|e| e.code), Some(-32005));
        assert_eq!(server.progress().snapshot().records.len(), 5);
    }

    #[test]
    fn test_config_file_sets_all_time_window() {
        let file = write_temp("[engine]\nall_time_days = 30\n\n[logging]\nlevel = \"debug\"\n");
        let config = Config::load(file.path()).expect("config loads");
        assert_eq!(config.engine.all_time_days, 30);
        assert_eq!(config.logging.level, "debug");

        let server = ProgressServer::new(config.engine).expect("Failed to create server");
        let range = range_for(ViewMode::AllTime, day("2024-06-30"), server.analytics().config()).expect("range");
        assert_eq!(range.start(), day("2024-06-01"));
    }

    #[test]
    fn test_config_rejects_oversized_window() {
        let file = write_temp("[engine]\nall_time_days = 5000\n");
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::InvalidValue { field: "engine.all_time_days", .. })
        ));
        assert!(ProgressServer::new(EngineConfig { all_time_days: 0 }).is_err());
    }
}
