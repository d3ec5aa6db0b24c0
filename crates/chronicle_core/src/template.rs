use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::calendar::CalendarNames;
use crate::error::ChronicleError;
use crate::fragment::DayKey;
use crate::roles::Role;

pub const BUILD_ID_ENV: &str = "CHRONICLE_BUILD_ID";
pub const BUILD_DATE_ENV: &str = "CHRONICLE_BUILD_DATE";
pub const GIT_COMMIT_ENV: &str = "CHRONICLE_GIT_COMMIT";
pub const GIT_BRANCH_ENV: &str = "CHRONICLE_GIT_BRANCH";
pub const GIT_URL_ENV: &str = "CHRONICLE_GIT_URL";
pub const BUILD_FALLBACK: &str = "snapshot";

/// Build metadata substituted into boilerplate templates. Read once per run
/// so every synthesized fragment sees the same values.
#[derive(Debug, Clone)]
pub struct BuildInfo {
    pub build_id: String,
    pub build_date: String,
    pub git_commit: String,
    pub git_branch: String,
    pub git_url: String,
}

fn env_or_fallback(name: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| BUILD_FALLBACK.to_string())
}

impl BuildInfo {
    pub fn from_env() -> BuildInfo {
        BuildInfo {
            build_id: env_or_fallback(BUILD_ID_ENV),
            build_date: env_or_fallback(BUILD_DATE_ENV),
            git_commit: env_or_fallback(GIT_COMMIT_ENV),
            git_branch: env_or_fallback(GIT_BRANCH_ENV),
            git_url: env_or_fallback(GIT_URL_ENV),
        }
    }
}

/// Substitution context for one day.
#[derive(Debug, Clone)]
pub struct DayContext {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub month_name: String,
    pub weekday_name: String,
}

impl DayContext {
    pub fn for_day(day: DayKey, calendar: &dyn CalendarNames) -> DayContext {
        DayContext {
            year: day.year,
            month: day.month,
            day: day.day,
            month_name: calendar.month_name(day.month),
            weekday_name: calendar.weekday_name(day.year, day.month, day.day),
        }
    }
}

/// Boilerplate templates loaded from a directory of `<name>.html` files,
/// addressed by role template names.
#[derive(Debug, Clone)]
pub struct Templates {
    templates: BTreeMap<String, String>,
}

impl Templates {
    pub fn open(dir: &Path) -> Result<Templates, ChronicleError> {
        let entries = fs::read_dir(dir)
            .map_err(|err| ChronicleError::Io(format!("read templates {}: {}", dir.display(), err)))?;
        let mut templates = BTreeMap::new();
        for entry in entries {
            let entry = entry
                .map_err(|err| ChronicleError::Io(format!("read templates {}: {}", dir.display(), err)))?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("html") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let content = fs::read_to_string(&path)
                .map_err(|err| ChronicleError::Io(format!("read {}: {}", path.display(), err)))?;
            templates.insert(name.to_string(), content);
        }
        Ok(Templates { templates })
    }

    /// Render the named role's template against a day and the build
    /// metadata. A missing template is fatal; an unresolved token is not.
    pub fn render(
        &self,
        role: Role,
        day: &DayContext,
        build: &BuildInfo,
    ) -> Result<String, ChronicleError> {
        let name = role.template_name();
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| ChronicleError::TemplateNotFound(name.to_string()))?;
        substitute(template, name, &token_values(day, build))
    }
}

fn token_values(day: &DayContext, build: &BuildInfo) -> BTreeMap<&'static str, String> {
    BTreeMap::from([
        ("YEAR", day.year.to_string()),
        ("MONTH", day.month.to_string()),
        ("MONTH_NAME", day.month_name.clone()),
        ("DAY", day.day.to_string()),
        ("WEEKDAY", day.weekday_name.clone()),
        ("BUILD_ID", build.build_id.clone()),
        ("BUILD_DATE", build.build_date.clone()),
        ("GIT_COMMIT", build.git_commit.clone()),
        ("GIT_BRANCH", build.git_branch.clone()),
        ("GIT_URL", build.git_url.clone()),
    ])
}

/// Literal token-replace pass over `@@NAME@@` placeholders. Unknown tokens
/// stay verbatim so later passes can pick them up; an opening delimiter with
/// no closing one is malformed.
fn substitute(
    template: &str,
    name: &str,
    values: &BTreeMap<&'static str, String>,
) -> Result<String, ChronicleError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("@@") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("@@") else {
            return Err(ChronicleError::TemplateRender {
                template: name.to_string(),
                message: "unterminated @@ placeholder".to_string(),
            });
        };
        let token = &after[..end];
        match values.get(token) {
            Some(value) => out.push_str(value),
            None => {
                out.push_str("@@");
                out.push_str(token);
                out.push_str("@@");
            }
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    Ok(out)
}
