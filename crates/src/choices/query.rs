use crate::choice::Choice;
use crate::choices::Choices;
use regex::Regex;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

pub type Predicate = Arc<dyn Fn(&Choice) -> bool + Send + Sync>;

// A filter over the indexable choices.
#[derive(Clone)]
pub enum Query {
    Predicate(Predicate),
    // Equal to the name or the key.
    Text(String),
    // Matches the name or the key.
    Pattern(Regex),
    // Every listed property must be present and equal.
    Fields(Map<String, Value>),
    // Results of each query, concatenated in order.
    Any(Vec<Query>),
    Nothing,
}

impl Query {
    pub fn predicate(f: impl Fn(&Choice) -> bool + Send + Sync + 'static) -> Self {
        Query::Predicate(Arc::new(f))
    }

    // Strings, objects and arrays of those; any other JSON shape matches nothing.
    pub fn from_json(v: Value) -> Self {
        match v {
            Value::String(s) => Query::Text(s),
            Value::Object(m) => Query::Fields(m),
            Value::Array(arr) => Query::Any(arr.into_iter().map(Query::from_json).collect()),
            _ => Query::Nothing,
        }
    }
}

impl fmt::Debug for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Predicate(_) => f.write_str("Predicate(<fn>)"),
            Query::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Query::Pattern(re) => f.debug_tuple("Pattern").field(&re.as_str()).finish(),
            Query::Fields(m) => f.debug_tuple("Fields").field(m).finish(),
            Query::Any(qs) => f.debug_tuple("Any").field(qs).finish(),
            Query::Nothing => f.write_str("Nothing"),
        }
    }
}

impl From<&str> for Query {
    fn from(s: &str) -> Self {
        Query::Text(s.to_string())
    }
}

impl From<String> for Query {
    fn from(s: String) -> Self {
        Query::Text(s)
    }
}

impl From<Regex> for Query {
    fn from(re: Regex) -> Self {
        Query::Pattern(re)
    }
}

impl From<Map<String, Value>> for Query {
    fn from(m: Map<String, Value>) -> Self {
        Query::Fields(m)
    }
}

impl From<Vec<Query>> for Query {
    fn from(qs: Vec<Query>) -> Self {
        Query::Any(qs)
    }
}

impl Choices {
    // Choices matching `query`, in list order (per sub-query for `Any`).
    #[doc(alias = "where")]
    pub fn matching(&self, query: impl Into<Query>) -> Vec<&Choice> {
        let answers = self.answers();
        match query.into() {
            Query::Predicate(f) => self.filter(|c| f(c)),
            Query::Text(s) => self.filter(|c| c.name == s || c.key == s),
            Query::Pattern(re) => self.filter(|c| re.is_match(&c.name) || re.is_match(&c.key)),
            Query::Fields(m) if m.is_empty() => vec![],
            Query::Fields(m) => self.filter(|c| {
                m.iter()
                    .all(|(k, v)| c.field(k, answers).as_ref() == Some(v))
            }),
            Query::Any(qs) => qs.into_iter().flat_map(|q| self.matching(q)).collect(),
            Query::Nothing => vec![],
        }
    }

    // One property of every indexable choice; missing ones are `null`.
    pub fn pluck(&self, field: &str) -> Vec<Value> {
        let answers = self.answers();
        self.items()
            .map(|c| c.field(field, answers).unwrap_or(Value::Null))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::RawChoice;
    use crate::options::Options;
    use serde_json::json;

    fn fixture() -> Choices {
        Choices::new(["foo", "bar", "baz"], Options::default()).unwrap()
    }

    fn names(found: Vec<&Choice>) -> Vec<&str> {
        found.into_iter().map(|c| c.name.as_str()).collect()
    }

    fn fields(v: Value) -> Query {
        Query::from_json(v)
    }

    #[test]
    fn matches_by_predicate() {
        let c = fixture();
        assert_eq!(names(c.matching(Query::predicate(|c| c.name == "bar"))), ["bar"]);
    }

    #[test]
    fn matches_by_name_or_key() {
        let c = Choices::new(
            vec![
                RawChoice::named("foo"),
                RawChoice {
                    key: Some("b".into()),
                    ..RawChoice::named("bar")
                },
            ],
            Options::default(),
        )
        .unwrap();
        assert_eq!(names(c.matching("foo")), ["foo"]);
        assert_eq!(names(c.matching("b")), ["bar"]);
        assert!(c.matching("nope").is_empty());
    }

    #[test]
    fn matches_by_pattern() {
        let c = fixture();
        let re = Regex::new("^ba").unwrap();
        assert_eq!(names(c.matching(re)), ["bar", "baz"]);
    }

    #[test]
    fn matches_by_object_requiring_every_key() {
        let c = Choices::new(
            vec![
                RawChoice {
                    extra: json!({"group": "x"}).as_object().cloned().unwrap(),
                    ..RawChoice::named("foo")
                },
                RawChoice {
                    extra: json!({"group": "y"}).as_object().cloned().unwrap(),
                    ..RawChoice::named("bar")
                },
            ],
            Options::default(),
        )
        .unwrap();
        assert_eq!(names(c.matching(fields(json!({"name": "bar"})))), ["bar"]);
        assert_eq!(names(c.matching(fields(json!({"group": "x"})))), ["foo"]);
        assert!(c
            .matching(fields(json!({"name": "foo", "group": "y"})))
            .is_empty());
        assert!(c.matching(fields(json!({"wrong": "foo"}))).is_empty());
        assert!(c.matching(fields(json!({}))).is_empty());
    }

    #[test]
    fn arrays_concatenate_sub_results() {
        let c = fixture();
        assert_eq!(names(c.matching(fields(json!(["baz", "bar"])))), ["baz", "bar"]);
        assert_eq!(
            names(c.matching(fields(json!([{"name": "foo"}, {"name": "bar"}])))),
            ["foo", "bar"]
        );
        let mixed = Query::Any(vec![
            Query::predicate(|c| c.name == "foo"),
            "bar".into(),
            fields(json!({"name": "baz"})),
        ]);
        assert_eq!(names(c.matching(mixed)), ["foo", "bar", "baz"]);
    }

    #[test]
    fn composition_equals_concatenation() {
        let c = fixture();
        let a = Query::from("bar");
        let b = Query::Pattern(Regex::new("o").unwrap());
        let mut expected = names(c.matching(a.clone()));
        expected.extend(names(c.matching(b.clone())));
        assert_eq!(names(c.matching(Query::Any(vec![a, b]))), expected);
    }

    #[test]
    fn unsupported_shapes_match_nothing() {
        let c = fixture();
        assert!(c.matching(fields(json!(42))).is_empty());
        assert!(c.matching(fields(json!(null))).is_empty());
        assert!(c.matching(Query::Nothing).is_empty());
    }

    #[test]
    fn pluck_preserves_order() {
        let mut c = fixture();
        c.check("baz");
        assert_eq!(c.pluck("name"), vec![json!("foo"), json!("bar"), json!("baz")]);
        assert_eq!(c.pluck("checked"), vec![json!(false), json!(false), json!(true)]);
        assert_eq!(c.pluck("index"), vec![json!(0), json!(1), json!(2)]);
        assert_eq!(c.pluck("missing"), vec![Value::Null; 3]);
    }
}
