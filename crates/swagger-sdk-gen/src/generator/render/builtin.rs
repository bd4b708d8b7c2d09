//! Templates compiled into the generator and the default target layout per language.

use std::path::Path;

use crate::generator::{
  languages::TargetLanguage,
  render::target::{RenderTarget, TemplateKind, TemplateSource, TemplateTask},
};

const TEMPLATES: &[(&str, &str)] = &[
  ("csharp/client", include_str!("../../../templates/csharp/client.tera")),
  ("csharp/model", include_str!("../../../templates/csharp/model.tera")),
  ("csharp/enum", include_str!("../../../templates/csharp/enum.tera")),
  ("java/client", include_str!("../../../templates/java/client.tera")),
  ("java/model", include_str!("../../../templates/java/model.tera")),
  ("java/enum", include_str!("../../../templates/java/enum.tera")),
  ("php/methods", include_str!("../../../templates/php/methods.tera")),
  ("php/enum", include_str!("../../../templates/php/enum.tera")),
  ("python/methods", include_str!("../../../templates/python/methods.tera")),
  ("python/enums", include_str!("../../../templates/python/enums.tera")),
  ("ruby/category", include_str!("../../../templates/ruby/category.tera")),
  ("javascript/client", include_str!("../../../templates/javascript/client.tera")),
  ("apex/client", include_str!("../../../templates/apex/client.tera")),
  ("apex/model", include_str!("../../../templates/apex/model.tera")),
  ("apex/fetch_model", include_str!("../../../templates/apex/fetch_model.tera")),
  ("apex/enum", include_str!("../../../templates/apex/enum.tera")),
];

pub fn template(name: &str) -> Option<&'static str> {
  TEMPLATES
    .iter()
    .find(|(candidate, _)| *candidate == name)
    .map(|(_, text)| *text)
}

#[cfg(test)]
pub fn template_names() -> impl Iterator<Item = &'static str> {
  TEMPLATES.iter().map(|(name, _)| *name)
}

/// The built-in layout for `language`, rooted at `<output_dir>/<language>`.
pub fn default_target(language: TargetLanguage, output_dir: &Path) -> RenderTarget {
  let task = |name: &str, kind: TemplateKind, output: &str| {
    TemplateTask::builder()
      .source(TemplateSource::Builtin(name.to_string()))
      .kind(kind)
      .output(output)
      .build()
  };

  let templates = match language {
    TargetLanguage::CSharp => vec![
      task("csharp/client", TemplateKind::SingleFile, "ApiClient.cs"),
      task("csharp/model", TemplateKind::UniqueModels, "models/{name}.cs"),
      task("csharp/enum", TemplateKind::Enums, "enums/{name}.cs"),
    ],
    TargetLanguage::Java => vec![
      task("java/client", TemplateKind::SingleFile, "ApiClient.java"),
      task("java/model", TemplateKind::UniqueModels, "models/{name}.java"),
      task("java/enum", TemplateKind::Enums, "enums/{name}.java"),
    ],
    TargetLanguage::Php => vec![
      task("php/methods", TemplateKind::SingleFile, "src/Methods.php"),
      task("php/enum", TemplateKind::Enums, "src/enums/{name}.php"),
    ],
    TargetLanguage::Python => vec![
      task("python/methods", TemplateKind::SingleFile, "client_methods.py"),
      task("python/enums", TemplateKind::SingleFile, "enums.py"),
    ],
    TargetLanguage::Ruby => vec![task(
      "ruby/category",
      TemplateKind::MethodCategories,
      "lib/client/{name.snake}.rb",
    )],
    TargetLanguage::JavaScript => vec![task("javascript/client", TemplateKind::SingleFile, "lib/ApiClient.js")],
    TargetLanguage::Apex => vec![
      task("apex/client", TemplateKind::SingleFile, "classes/ApiClient.cls"),
      task("apex/model", TemplateKind::UniqueModels, "classes/{name}.cls"),
      task("apex/fetch_model", TemplateKind::FetchModels, "classes/{name}.cls"),
      task("apex/enum", TemplateKind::Enums, "classes/{name}.cls"),
    ],
  };

  RenderTarget::builder()
    .name(language.as_str())
    .language(language)
    .root_folder(output_dir.join(language.as_str()))
    .templates(templates)
    .build()
}
