//! Fence language to editor MIME type lookup.
//!
//! The platform's code editor widget selects its highlighting mode from the
//! `data-type` attribute of the `<pre>` element. Keys are matched exactly and
//! case-sensitively.

/// MIME type used for unknown or missing languages.
pub const DEFAULT_MIME_TYPE: &str = "text/plain";

/// Language alias to editor MIME type.
pub const LANGUAGE_MIME_TYPES: &[(&str, &str)] = &[
    ("c", "text/x-csrc"),
    ("csharp", "text/x-csharp"),
    ("c#", "text/x-csharp"),
    ("cpp", "text/x-c++src"),
    ("c++", "text/x-c++src"),
    ("coffee", "text/coffeescript"),
    ("coffeescript", "text/coffeescript"),
    ("Dockerfile", "text/x-dockerfile"),
    ("dart", "application/dart"),
    ("css", "text/css"),
    ("java", "text/x-java"),
    ("kt", "text/x-kotlin"),
    ("kotlin", "text/x-kotlin"),
    ("json", "application/json"),
    ("html", "text/html"),
    ("md", "text/x-markdown"),
    ("markdown", "text/x-markdown"),
    ("hs", "text/x-haskell"),
    ("haskell", "text/x-haskell"),
    ("objc", "text/x-objectivec"),
    ("objective-c", "text/x-objectivec"),
    ("js", "text/javascript"),
    ("javascript", "text/javascript"),
    ("ts", "text/typescript"),
    ("typescript", "text/typescript"),
    ("go", "text/x-go"),
    ("php", "application/x-httpd-php"),
    ("py", "text/x-python"),
    ("python", "text/x-python"),
    ("ps1", "application/x-powershell"),
    ("psm1", "application/x-powershell"),
    ("powershell", "application/x-powershell"),
    ("pl", "text/x-perl"),
    ("perl", "text/x-perl"),
    ("sc", "text/x-scala"),
    ("scala", "text/x-scala"),
    ("sass", "text/x-sass"),
    ("r", "text/x-rsrc"),
    ("rb", "text/x-ruby"),
    ("ruby", "text/x-ruby"),
    ("sh", "text/x-sh"),
    ("vue", "text/x-vue"),
    ("swift", "text/x-swift"),
    ("sql", "text/x-sql"),
    ("xml", "application/xml"),
];

/// Resolve a fence info string to the editor MIME type.
///
/// Only the first whitespace-delimited token of `info` is considered.
///
/// ```
/// use fastype_markdown::mime_type_for;
///
/// assert_eq!(mime_type_for("python"), "text/x-python");
/// assert_eq!(mime_type_for("js title=app.js"), "text/javascript");
/// assert_eq!(mime_type_for("foobar"), "text/plain");
/// assert_eq!(mime_type_for(""), "text/plain");
/// ```
#[must_use]
pub fn mime_type_for(info: &str) -> &'static str {
    let Some(language) = info.split_whitespace().next() else {
        return DEFAULT_MIME_TYPE;
    };
    LANGUAGE_MIME_TYPES
        .iter()
        .find(|(alias, _)| *alias == language)
        .map_or(DEFAULT_MIME_TYPE, |&(_, mime)| mime)
}
