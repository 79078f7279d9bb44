use super::*;

#[derive(Debug)]
struct Exploding(CompareError);

impl CustomValue for Exploding {
	fn type_name(&self) -> &'static str {
		"exploding"
	}

	fn eq_value(&self, _other: &Value) -> Result<bool, CompareError> {
		Err(self.0.clone())
	}
}

fn nested(depth: usize) -> Value {
	let mut v = Value::Int(0);
	for _ in 0..depth {
		v = Value::from(vec![v]);
	}
	v
}

#[test]
fn clones_share_identity() {
	let s = Value::from("abc");
	assert!(s.is_same(&s.clone()));
	assert!(!s.is_same(&Value::from("abc")));
	assert!(s.try_eq(&Value::from("abc")).unwrap());
}

#[test]
fn nan_is_identical_but_not_equal() {
	let nan = Value::Float(f64::NAN);
	assert!(nan.is_same(&nan.clone()));
	assert!(!nan.try_eq(&nan).unwrap());
}

#[test]
fn int_and_float_compare_numerically() {
	assert!(Value::Int(3).try_eq(&Value::Float(3.0)).unwrap());
	assert!(!Value::Int(3).try_eq(&Value::Float(3.5)).unwrap());
	assert!(!Value::Int(i64::MAX).try_eq(&Value::Float(9_223_372_036_854_775_808.0)).unwrap());
	assert!(!Value::Int(3).is_same(&Value::Float(3.0)));
}

#[test]
fn mismatched_variants_are_unequal() {
	assert!(!Value::from("1").try_eq(&Value::Int(1)).unwrap());
	assert!(!Value::None.try_eq(&Value::Bool(false)).unwrap());
}

#[test]
fn lists_compare_elementwise() {
	let a = Value::list(["x", "y"]);
	assert!(a.try_eq(&Value::list(["x", "y"])).unwrap());
	assert!(!a.try_eq(&Value::list(["x"])).unwrap());
	assert!(!a.try_eq(&Value::list(["x", "z"])).unwrap());
}

#[test]
fn deep_nesting_is_fatal() {
	let err = nested(MAX_COMPARE_DEPTH + 2).try_eq(&nested(MAX_COMPARE_DEPTH + 2)).expect_err("too deep");
	assert_eq!(err, CompareError::DepthExceeded);
	assert!(err.is_fatal());
	assert!(nested(8).try_eq(&nested(8)).unwrap());
}

#[test]
fn custom_failures_surface_from_either_side() {
	let bad = Value::custom(Exploding(CompareError::Failed("nope".into())));
	assert!(matches!(bad.try_eq(&Value::Int(1)), Err(CompareError::Failed(_))));
	assert!(matches!(Value::Int(1).try_eq(&bad), Err(CompareError::Failed(_))));
	assert!(bad.is_same(&bad.clone()));
	assert_ne!(bad, Value::Int(1));
}

#[test]
fn severity_classification() {
	assert!(!CompareError::Failed(String::new()).is_fatal());
	assert!(!CompareError::Unsupported { left: "a", right: "b" }.is_fatal());
	assert!(CompareError::OutOfMemory.is_fatal());
	assert!(CompareError::Interrupted.is_fatal());
}

#[test]
fn interned_names_share_storage() {
	let a = Name::intern("axis");
	let b = Name::from("axis");
	assert!(a.is_same(&b));

	let loose = Name::uninterned("axis");
	assert!(!a.is_same(&loose));
	assert_eq!(a, loose);
	assert!(loose.interned().is_same(&a));
	assert_eq!(a, "axis");
}

#[test]
fn string_conversions_never_grow_the_interner() {
	for i in 0..100 {
		let name = Name::from(format!("generated_kw_{i}"));
		assert_eq!(name, format!("generated_kw_{i}").as_str());
	}
	let borrowed = Name::from("generated_kw_borrowed");
	assert!(!is_interned("generated_kw_borrowed"));
	assert!(!is_interned("generated_kw_0"));
	assert!(!is_interned("generated_kw_99"));
	assert!(!Name::intern("generated_kw_borrowed").is_same(&borrowed));
}

#[test]
fn string_conversion_reuses_existing_entry() {
	let canonical = Name::intern("keepdims");
	assert!(Name::from("keepdims").is_same(&canonical));
	assert!(Name::from(String::from("keepdims")).is_same(&canonical));
}
