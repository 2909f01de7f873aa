#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Author {
    User(String),
    Assistant,
}

impl ToString for Author {
    fn to_string(&self) -> String {
        match self {
            Author::User(username) => return username.to_string(),
            Author::Assistant => return String::from("AI Response"),
        }
    }
}
