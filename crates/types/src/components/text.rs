crate::component! {
    #[derive(Default, Eq, Hash)]
    Text(String) : "arrowlog.components.Text"
}


impl From<&str> for Text {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}


impl AsRef<str> for Text {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
