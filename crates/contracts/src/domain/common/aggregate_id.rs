/// Typed identifier for an aggregate, convertible to/from its string form.
pub trait AggregateId: Sized {
    fn as_string(&self) -> String;
    fn from_string(s: &str) -> Result<Self, String>;
}
