//! Benchmarks for chat response handling
//!
//! This benchmark measures:
//! - Envelope validation and decoding of plain and tool-call responses
//! - Tool argument decoding
//! - Round-1 request serialization with a tool catalogue

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::{json, Value};
use toolcall_agent::protocol::{self, ChatRequest};
use toolcall_agent::tools::{finance, geocoding, weather};
use toolcall_agent::{Message, ToolCallRequest};

const PLAIN_RESPONSE: &str = r#"{
    "id": "chatcmpl-bench",
    "model": "mistral-nemo-instruct-2407",
    "choices": [{
        "index": 0,
        "message": {"role": "assistant", "content": "It is 14 degrees and windy in Berlin."},
        "finish_reason": "stop"
    }],
    "usage": {"prompt_tokens": 120, "completion_tokens": 12, "total_tokens": 132}
}"#;

fn tool_call_response(calls: usize) -> String {
    let calls: Vec<Value> = (0..calls)
        .map(|i| {
            json!({
                "id": format!("call_{i}"),
                "type": "function",
                "function": {
                    "name": "get_weather",
                    "arguments": json!({"latitude": 52.52, "longitude": 13.41}).to_string()
                }
            })
        })
        .collect();
    json!({
        "choices": [{
            "message": {"role": "assistant", "content": null, "tool_calls": calls},
            "finish_reason": "tool_calls"
        }]
    })
    .to_string()
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("response_parsing");
    group.throughput(Throughput::Bytes(PLAIN_RESPONSE.len() as u64));
    group.bench_function("plain_answer", |b| {
        b.iter(|| protocol::parse(black_box(PLAIN_RESPONSE)))
    });
    group.bench_function("empty_choices_rejected", |b| {
        b.iter(|| protocol::parse(black_box(r#"{"choices": []}"#)))
    });
    group.finish();

    let mut group = c.benchmark_group("tool_call_responses");
    for calls in [1usize, 4, 16] {
        let body = tool_call_response(calls);
        group.throughput(Throughput::Bytes(body.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(calls), &body, |b, body| {
            b.iter(|| protocol::parse(black_box(body)))
        });
    }
    group.finish();
}

fn bench_arguments(c: &mut Criterion) {
    let args = json!({"latitude": 52.52, "longitude": 13.41});
    let call = ToolCallRequest::new("call_0", "get_weather", args.as_object().unwrap());
    c.bench_function("decode_arguments", |b| b.iter(|| black_box(&call).decode_arguments()));
}

fn bench_request(c: &mut Criterion) {
    let catalogue = vec![
        geocoding::schema().to_definition(),
        weather::schema().to_definition(),
        finance::schema().to_definition(),
    ];
    let messages = vec![
        Message::system("You are a helpful weather assistant."),
        Message::user("What's the weather like in Berlin today?"),
    ];
    c.bench_function("round_one_request_json", |b| {
        b.iter(|| {
            let request = ChatRequest::new("mistral-nemo-instruct-2407", &messages).tools(&catalogue);
            serde_json::to_string(black_box(&request))
        })
    });
}

criterion_group!(benches, bench_parse, bench_arguments, bench_request);
criterion_main!(benches);
