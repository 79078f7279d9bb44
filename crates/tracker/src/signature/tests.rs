use telemetric_statswrapper::{Arguments, Value};

use super::*;

type Echo = fn(&Arguments) -> Result<(), ()>;

fn echo(_: &Arguments) -> Result<(), ()> {
	Ok(())
}

fn sample() -> Signature {
	Signature::new()
		.positional_only("x")
		.positional_or_keyword("axis")
		.positional_or_keyword("out")
		.var_positional("args")
		.keyword_only("order")
		.var_keyword("kwargs")
}

fn names(w: &StatsWrapper<Echo>) -> Vec<Option<String>> {
	w.get_parameter_stats().into_iter().map(|s| s.name.map(|n| n.to_string())).collect()
}

#[test]
fn plan_without_positional_tracking() {
	let plan = AutoPlan::new(&sample(), AutoOptions::default());
	assert_eq!(plan.positional.len(), 1);
	let kw: Vec<_> = plan.keyword.iter().map(|(n, _)| n.to_string()).collect();
	assert_eq!(kw, ["axis", "out", "order"]);
	assert_eq!(plan.boundary, 3);
}

#[test]
fn plan_with_positional_tracking_duplicates_slots() {
	let plan = AutoPlan::new(&sample(), AutoOptions { track_positional_use: true });
	assert_eq!(plan.positional.len(), 3);
	assert_eq!(plan.keyword.len(), 3);
	assert_eq!(plan.boundary, 3);
}

#[test]
fn auto_wrapper_maps_positionals_onto_keyword_slots() {
	let w = wrap_auto(echo as Echo, &sample(), AutoOptions::default()).expect("wrap");
	assert_eq!(names(&w), [None, Some("axis".to_string()), Some("out".to_string()), Some("order".to_string())]);
	assert_eq!(w.positional_boundary(), 3);

	w.invoke(&Arguments::new().arg(1).arg(0)).unwrap().unwrap();
	w.invoke(&Arguments::new().arg(1).kwarg("axis", 1).kwarg("order", "C")).unwrap().unwrap();

	let counts: Vec<_> = w.get_parameter_stats().iter().map(|s| s.count).collect();
	assert_eq!(counts, [2, 2, 0, 1]);
	assert_eq!(w.get_counts().invalid_args, 0);
}

#[test]
fn auto_wrapper_separates_positional_use_when_requested() {
	let w = wrap_auto(echo as Echo, &sample(), AutoOptions { track_positional_use: true }).expect("wrap");
	w.invoke(&Arguments::new().arg(1).arg(0)).unwrap().unwrap();
	w.invoke(&Arguments::new().arg(1).kwarg("axis", 1)).unwrap().unwrap();

	let stats = w.get_parameter_stats();
	assert_eq!(stats[1].name, None);
	assert_eq!(stats[1].count, 1);
	assert_eq!(stats[3].name.as_ref().map(|n| n.as_str()), Some("axis"));
	assert_eq!(stats[3].count, 1);
}

#[test]
fn variadic_and_keyword_only_misuse_is_invalid() {
	let w = wrap_auto(echo as Echo, &sample(), AutoOptions::default()).expect("wrap");
	w.invoke(&Arguments::new().arg(1).arg(2).arg(3).arg(4)).unwrap().unwrap();
	w.invoke(&Arguments::new().arg(1).kwarg("extra", true)).unwrap().unwrap();
	assert_eq!(w.get_counts().as_tuple(), (2, 0, 2));
	assert_eq!(w.get_parameter_stats()[3].count, 0);
}

#[test]
fn declared_specs_are_kept() {
	let sig = Signature::new().param(Param::new("mode", ParamKind::KeywordOnly).with_spec(ParamSpec::known(["r", "w"])));
	let w = wrap_auto(echo as Echo, &sig, AutoOptions::default()).expect("wrap");
	w.invoke(&Arguments::new().kwarg("mode", Value::from("w"))).unwrap().unwrap();
	assert_eq!(w.positional_boundary(), 0);
	assert_eq!(w.get_parameter_stats()[0].value_counts, Some(vec![0, 1]));
}
