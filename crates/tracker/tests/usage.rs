use pretty_assertions::assert_eq;
use telemetric_statswrapper::{Arguments, ParamSpec, StatsWrapper, Value};
use telemetric_tracker::{Bind, FunctionId, Signature, Tracker, TrackerConfig};

fn init_tracing() {
	let _ = tracing_subscriber::fmt::try_init();
}

type Method = fn(&Arguments) -> Result<String, String>;

/// `receiver.describe(label, upper=False)`
fn describe(args: &Arguments) -> Result<String, String> {
	let [receiver, label] = args.positional() else {
		return Err(format!("expected 2 positionals, got {}", args.positional().len()));
	};
	let (Value::Str(receiver), Value::Str(label)) = (receiver, label) else {
		return Err("expected strings".into());
	};
	let text = format!("{receiver}:{label}");
	Ok(match args.get("upper") {
		Some(Value::Bool(true)) => text.to_uppercase(),
		_ => text,
	})
}

#[test]
fn bound_receiver_is_first_positional() {
	init_tracing();
	let w = StatsWrapper::builder()
		.wrap(describe as Method)
		.positional(ParamSpec::Untracked)
		.positional(ParamSpec::known(["x", "y"]))
		.keyword("upper", ParamSpec::known([true, false]))
		.build()
		.expect("build");

	let bound = w.bind("obj");
	assert_eq!(bound.invoke(&Arguments::new().arg("x")).unwrap(), Ok("obj:x".to_string()));
	assert_eq!(
		bound.invoke(&Arguments::new().arg("y").kwarg("upper", true)).unwrap(),
		Ok("OBJ:Y".to_string())
	);
	assert_eq!(w.invoke(&Arguments::new().arg("x")).unwrap(), Err("expected 2 positionals, got 1".to_string()));

	let stats = w.get_parameter_stats();
	assert_eq!(stats[0].count, 3);
	assert_eq!(stats[1].value_counts, Some(vec![1, 1]));
	assert_eq!(stats[2].value_counts, Some(vec![1, 0]));
	assert_eq!(w.get_counts().as_tuple(), (3, 1, 0));
}

#[test]
fn config_loads_from_json() {
	let config: TrackerConfig = serde_json::from_str(r#"{ "track_positional_use": true }"#).expect("parse");
	assert_eq!(
		config,
		TrackerConfig {
			track_positional_use: true,
			skip_uncalled: true,
		}
	);
	assert!(serde_json::from_str::<TrackerConfig>(r#"{ "bogus": 1 }"#).is_err());
}

#[test]
fn snapshots_serialize_for_external_exporters() {
	init_tracing();
	let tracker = Tracker::new();
	let sig = Signature::new().positional_only("receiver").positional_or_keyword("label");
	let w = tracker
		.wrap_auto(&FunctionId::new("demo", "describe"), describe as Method, &sig)
		.expect("wrap");
	assert_eq!(w.invoke(&Arguments::new().arg("a").arg("b")).unwrap(), Ok("a:b".to_string()));

	let json = serde_json::to_value(tracker.snapshots()).expect("serialize");
	assert_eq!(
		json,
		serde_json::json!([{
			"function": { "module": "demo", "name": "describe" },
			"counts": { "total_calls": 1, "errors": 0, "invalid_args": 0 },
			"parameters": [
				{ "name": null, "count": 1, "known_values": null, "value_counts": null },
				{ "name": "label", "count": 1, "known_values": null, "value_counts": null }
			]
		}])
	);
}
