/// End-to-end tests speaking JSON-RPC to the MCP server
use habit_progress::mcp::McpServer;
use habit_progress::*;
use serde_json::{json, Value};

fn day(s: &str) -> DayId {
    s.parse().expect("valid day")
}

fn server() -> McpServer {
    let progress = ProgressServer::new(EngineConfig::default())
        .expect("Failed to create server")
        .with_today(day("2024-01-03"));
    McpServer::new(progress)
}

async fn call(server: &mut McpServer, request: Value) -> Value {
    let response = server
        .process_line(&request.to_string())
        .await
        .expect("expected a response");
    serde_json::to_value(response).expect("response serializes")
}

async fn call_tool(server: &mut McpServer, id: u64, name: &str, arguments: Value) -> Value {
    call(
        server,
        json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "tools/call",
            "params": { "name": name, "arguments": arguments }
        }),
    )
    .await
}

/// Decode the pretty JSON a successful tool returns as text
fn tool_payload(response: &Value) -> Value {
    assert!(response.get("error").is_none(), "unexpected error: {}", response);
    let result = &response["result"];
    assert_eq!(result["isError"], Value::Bool(false));
    let text = result["content"][0]["text"].as_str().expect("text content");
    serde_json::from_str(text).expect("tool text is JSON")
}

async fn load_week(server: &mut McpServer) {
    let response = call_tool(
        server,
        1,
        "snapshot_load",
        json!({
            "habits": [
                { "id": "h1", "name": "Meditate", "color": "#4caf50" },
                { "id": "h2", "name": "Stretch" }
            ],
            "records": [
                { "habitId": "h1", "date": "2024-01-01", "completed": true },
                { "habitId": "h1", "date": "2024-01-02", "completed": true },
                { "habitId": "h1", "date": "2024-01-03", "completed": true },
                { "habitId": "h2", "date": "2024-01-02", "completed": true },
                { "habitId": "h2", "date": "2024-01-02", "completed": false }
            ]
        }),
    )
    .await;
    let payload = tool_payload(&response);
    assert_eq!(payload["habits"], 2);
    assert_eq!(payload["records"], 5);
}

#[cfg(test)]
mod basic_integration_tests {
    use super::*;

    #[tokio::test]
    async fn test_initialize_handshake() {
        let mut server = server();
        let response = call(
            &mut server,
            json!({
                "jsonrpc": "2.0",
                "id": 0,
                "method": "initialize",
                "params": { "protocolVersion": "2024-11-05", "capabilities": {}, "clientInfo": { "name": "test", "version": "1" } }
            }),
        )
        .await;
        assert_eq!(response["result"]["protocolVersion"], "2024-11-05");
        assert_eq!(response["result"]["serverInfo"]["name"], "Habit Progress MCP");

        let notification = server
            .process_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        assert!(notification.is_none());
        assert!(server.is_initialized());
    }

    #[tokio::test]
    async fn test_tools_list_has_schemas() {
        let mut server = server();
        let response = call(&mut server, json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"})).await;
        let tools = response["result"]["tools"].as_array().expect("tool list");
        let names: Vec<&str> = tools.iter().filter_map(|t| t["name"].as_str()).collect();
        assert_eq!(
            names,
            ["snapshot_load", "date_range", "shift_period", "completion_stats", "habit_streaks", "progress_report"]
        );
        assert!(tools.iter().all(|t| t["inputSchema"].is_object()));
    }

    #[tokio::test]
    async fn test_snapshot_then_stats() {
        let mut server = server();
        load_week(&mut server).await;
        assert_eq!(server.progress().snapshot().habits.len(), 2);

        let stats = tool_payload(&call_tool(&mut server, 2, "completion_stats", json!({ "mode": "week" })).await);
        // 3 of 14 habit-days; h2's only completion was undone
        assert_eq!(stats["completion_rate"], 21);
        assert_eq!(stats["start"], "2024-01-01");
        assert_eq!(stats["prior_start"], "2023-12-25");
        assert_eq!(stats["prior_completion_rate"], 0);
        assert_eq!(stats["delta"], 21);
        assert_eq!(stats["daily"].as_array().map(Vec::len), Some(7));
    }

    #[tokio::test]
    async fn test_streaks_default_to_today() {
        let mut server = server();
        load_week(&mut server).await;

        let streaks = tool_payload(&call_tool(&mut server, 3, "habit_streaks", json!({ "habit_id": "h1" })).await);
        assert_eq!(streaks["as_of"], "2024-01-03");
        assert_eq!(streaks["streaks"][0]["current_streak"], 3);
        assert_eq!(streaks["streaks"][0]["best_streak"], 3);

        let later = tool_payload(
            &call_tool(&mut server, 4, "habit_streaks", json!({ "habit_id": "h1", "as_of": "2024-01-07" })).await,
        );
        assert_eq!(later["streaks"][0]["current_streak"], 0);
    }

    #[tokio::test]
    async fn test_unknown_habit_is_an_error() {
        let mut server = server();
        load_week(&mut server).await;
        let response = call_tool(&mut server, 5, "habit_streaks", json!({ "habit_id": "nope" })).await;
        assert_eq!(response["error"]["code"], -32004);
    }

    #[tokio::test]
    async fn test_date_range_and_shift() {
        let mut server = server();

        let feb = tool_payload(
            &call_tool(&mut server, 6, "date_range", json!({ "mode": "month", "anchor": "2024-02-10" })).await,
        );
        assert_eq!(feb["length"], 29);
        assert_eq!(feb["label"], "February 2024");

        let previous = tool_payload(
            &call_tool(&mut server, 7, "shift_period", json!({ "mode": "month", "anchor": "2024-01-15", "direction": -1 })).await,
        );
        assert_eq!(previous["anchor"], "2023-12-15");
        assert_eq!(previous["end"], "2023-12-31");

        let next = tool_payload(
            &call_tool(&mut server, 8, "shift_period", json!({ "mode": "week", "anchor": "2024-01-03", "direction": "next" })).await,
        );
        assert_eq!(next["start"], "2024-01-08");

        let forward = tool_payload(
            &call_tool(&mut server, 12, "shift_period", json!({ "mode": "week", "anchor": "2024-01-03", "direction": 1 })).await,
        );
        assert_eq!(forward["start"], "2024-01-08");

        let signed = tool_payload(
            &call_tool(&mut server, 13, "shift_period", json!({ "mode": "month", "anchor": "2024-01-31", "direction": "+1" })).await,
        );
        assert_eq!(signed["anchor"], "2024-02-29");

        let sideways = call_tool(&mut server, 14, "shift_period", json!({ "mode": "week", "direction": 2 })).await;
        assert_eq!(sideways["error"]["code"], -32003);
    }

    #[tokio::test]
    async fn test_bad_dates_and_ranges_report_codes() {
        let mut server = server();

        let malformed = call_tool(&mut server, 9, "date_range", json!({ "mode": "week", "anchor": "2024-02-30" })).await;
        assert_eq!(malformed["error"]["code"], -32001);

        let backwards = call_tool(
            &mut server,
            10,
            "date_range",
            json!({ "mode": "custom", "start": "2024-01-10", "end": "2024-01-01" }),
        )
        .await;
        assert_eq!(backwards["error"]["code"], -32002);
        assert_eq!(backwards["error"]["data"]["tool"], "date_range");
    }

    #[tokio::test]
    async fn test_inline_snapshot_with_bad_date() {
        let mut server = server();
        load_week(&mut server).await;

        let response = call_tool(
            &mut server,
            15,
            "snapshot_load",
            json!({
                "habits": [{ "id": "h1", "name": "Meditate" }],
                "records": [{ "habitId": "h1", "date": "2024-02-30", "completed": true }]
            }),
        )
        .await;
        assert_eq!(response["error"]["code"], -32001);
        assert_eq!(response["error"]["data"]["tool"], "snapshot_load");
        // The previous snapshot stays in place
        assert_eq!(server.progress().snapshot().records.len(), 5);
    }

    #[tokio::test]
    async fn test_progress_report() {
        let mut server = server();
        load_week(&mut server).await;

        let payload = tool_payload(&call_tool(&mut server, 11, "progress_report", json!({})).await);
        let report = &payload["report"];
        assert_eq!(report["label"], "Week of 2024-01-01");
        assert_eq!(report["habits"][0]["completion_rate"], 43);
        assert_eq!(report["habits"][0]["color"], "#4caf50");
        assert_eq!(report["habits"][1]["completed_days"], 0);
        assert!(payload["insights"].as_array().map_or(false, |i| !i.is_empty()));
    }

    #[tokio::test]
    async fn test_protocol_errors() {
        let mut server = server();

        let garbage = server.process_line("{not json").await.expect("response");
        assert_eq!(garbage.error.map(|e| e.code), Some(-32700));

        let unknown = call(&mut server, json!({"jsonrpc": "2.0", "id": 1, "method": "resources/list"})).await;
        assert_eq!(unknown["error"]["code"], -32601);

        let bad_args = call_tool(&mut server, 2, "shift_period", json!({ "mode": "week" })).await;
        assert_eq!(bad_args["error"]["code"], -32602);

        let unknown_tool = call_tool(&mut server, 3, "habit_delete", json!({})).await;
        assert_eq!(unknown_tool["result"]["isError"], Value::Bool(true));

        assert!(server.process_line("   ").await.is_none());
    }
}
