use std::fmt;

#[derive(Debug)]
pub enum ChronicleError {
    Validation {
        source: String,
        message: String,
    },
    DuplicateOrder {
        year: i32,
        month: u32,
        day: u32,
        order: String,
    },
    Parse {
        source: String,
        message: String,
    },
    TemplateNotFound(String),
    TemplateRender {
        template: String,
        message: String,
    },
    EmptyCorpus,
    Io(String),
    Render(String),
}

impl fmt::Display for ChronicleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChronicleError::Validation { source, message } => {
                write!(f, "validation error in {}: {}", source, message)
            }
            ChronicleError::DuplicateOrder {
                year,
                month,
                day,
                order,
            } => write!(
                f,
                "duplicate order {:?} on {:04}-{:02}-{:02}",
                order, year, month, day
            ),
            ChronicleError::Parse { source, message } => {
                write!(f, "parse error in {}: {}", source, message)
            }
            ChronicleError::TemplateNotFound(name) => {
                write!(f, "template not found: {}", name)
            }
            ChronicleError::TemplateRender { template, message } => {
                write!(f, "template render error in {}: {}", template, message)
            }
            ChronicleError::EmptyCorpus => {
                write!(f, "no fragments discovered in the corpus")
            }
            ChronicleError::Io(err) => write!(f, "io error: {}", err),
            ChronicleError::Render(err) => write!(f, "render error: {}", err),
        }
    }
}

impl std::error::Error for ChronicleError {}
