//! Renders target-language source text from the API model with `tera` templates.

pub mod builtin;
pub mod context;
pub mod fixups;
pub(crate) mod helpers;
pub(crate) mod merge;
pub mod target;

#[cfg(test)]
mod tests;

use std::{collections::HashSet, error::Error as _, path::PathBuf};

use tera::{Context, Tera};

use crate::generator::{
  errors::{GeneratorError, TargetFailure},
  languages::{KeywordFilter, TargetLanguage, TypeMapper},
  model::{ApiModel, ApiVersion},
  render::{
    context::{ApiView, CategoryView, EnumView, ModelView, OperationView, ViewBuilder},
    helpers::register_filters,
    merge::{MergeFields, merge_fields},
    target::{RenderTarget, TemplateKind, TemplateSource, TemplateTask},
  },
};

/// One generated file, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
  pub path: PathBuf,
  pub contents: String,
}

/// Template text ready to register, keyed by the name templates are rendered under.
#[derive(Debug, Clone)]
pub struct LoadedTemplate {
  pub name: String,
  pub text: String,
}

impl LoadedTemplate {
  /// Reads a template from its source; file templates are read asynchronously.
  pub async fn load(target: &str, source: &TemplateSource) -> Result<Self, GeneratorError> {
    match source {
      TemplateSource::Builtin(_) => Self::builtin(target, source),
      TemplateSource::File(path) => {
        let text = tokio::fs::read_to_string(path)
          .await
          .map_err(|err| GeneratorError::io(path, err))?;
        Ok(Self {
          name: source.template_name(),
          text,
        })
      }
    }
  }

  pub fn builtin(target: &str, source: &TemplateSource) -> Result<Self, GeneratorError> {
    let name = source.template_name();
    let text = match source {
      TemplateSource::Builtin(builtin_name) => builtin::template(builtin_name),
      TemplateSource::File(_) => None,
    }
    .ok_or_else(|| GeneratorError::TemplateRender {
      target: target.to_string(),
      template: name.clone(),
      message: "no built-in template with this name".to_string(),
    })?;

    Ok(Self {
      name,
      text: text.to_string(),
    })
  }
}

/// Renders one target. Holds the compiled templates and nothing else.
pub struct Renderer {
  target: RenderTarget,
  tera: Tera,
}

impl std::fmt::Debug for Renderer {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Renderer").field("target", &self.target.name).finish()
  }
}

impl Renderer {
  pub fn new(target: RenderTarget, templates: Vec<LoadedTemplate>) -> Result<Self, TargetFailure> {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);
    register_filters(&mut tera, target.language);

    let mut errors = vec![];
    for template in &templates {
      if let Err(err) = tera.add_raw_template(&template.name, &template.text) {
        errors.push(GeneratorError::TemplateRender {
          target: target.name.clone(),
          template: template.name.clone(),
          message: describe_tera_error(&err),
        });
      }
    }
    if !errors.is_empty() {
      return Err(TargetFailure::new(target.name, errors));
    }

    Ok(Self { target, tera })
  }

  /// Builds a renderer whose templates are all built in.
  #[cfg(test)]
  pub fn with_builtin_templates(target: RenderTarget) -> Result<Self, TargetFailure> {
    let templates = target
      .templates
      .iter()
      .map(|task| LoadedTemplate::builtin(&target.name, &task.source))
      .collect::<Result<Vec<_>, _>>()
      .map_err(|err| TargetFailure::single(&target.name, err))?;
    Self::new(target, templates)
  }

  /// Renders every template task of the target against `model`.
  ///
  /// Mapping and rendering errors are collected across all tasks.
  pub fn render(&self, model: &ApiModel) -> Result<Vec<RenderedArtifact>, TargetFailure> {
    let overrides = KeywordFilter::new(self.target.language).apply(model);
    let view = ViewBuilder::new(model, TypeMapper::for_language(self.target.language), &overrides)
      .build()
      .map_err(|errors| TargetFailure::new(&self.target.name, errors))?;

    let mut artifacts = vec![];
    let mut errors = vec![];
    let mut paths = HashSet::new();

    for task in &self.target.templates {
      let template = task.source.template_name();
      for item in render_items(task.kind, &view, model.version()) {
        match self.render_item(task, &template, &view, &item) {
          Ok(artifact) if !paths.insert(artifact.path.clone()) => errors.push(self.render_error(
            &template,
            format!("output path {} is produced more than once", artifact.path.display()),
          )),
          Ok(artifact) => artifacts.push(artifact),
          Err(err) => errors.push(err),
        }
      }
    }

    if errors.is_empty() {
      Ok(artifacts)
    } else {
      Err(TargetFailure::new(&self.target.name, errors))
    }
  }

  fn render_item(
    &self,
    task: &TemplateTask,
    template: &str,
    view: &ApiView,
    item: &RenderItem<'_>,
  ) -> Result<RenderedArtifact, GeneratorError> {
    let mut context = Context::new();
    context.insert("api", view);
    context.insert("version", &view.version);
    context.insert("language", &view.language);
    if let Some(binding) = item.binding {
      binding.insert_into(&mut context);
    }

    let contents = self
      .tera
      .render(template, &context)
      .map_err(|err| self.render_error(template, describe_tera_error(&err)))?;
    let relative = merge_fields(&task.output, &item.fields).map_err(|message| self.render_error(template, message))?;

    Ok(RenderedArtifact {
      path: self.target.root_folder.join(relative),
      contents,
    })
  }

  fn render_error(&self, template: &str, message: String) -> GeneratorError {
    GeneratorError::TemplateRender {
      target: self.target.name.clone(),
      template: template.to_string(),
      message,
    }
  }
}

/// One rendering of a template: the entity bound into the context and the fields its
/// output path may use.
struct RenderItem<'v> {
  binding: Option<Binding<'v>>,
  fields: MergeFields,
}

#[derive(Clone, Copy)]
enum Binding<'v> {
  Category(&'v CategoryView),
  Operation(&'v OperationView),
  Model(&'v ModelView),
  Enum(&'v EnumView),
}

impl Binding<'_> {
  fn insert_into(self, context: &mut Context) {
    match self {
      Self::Category(category) => context.insert("category", category),
      Self::Operation(operation) => context.insert("operation", operation),
      Self::Model(model) => context.insert("model", model),
      Self::Enum(enum_view) => context.insert("enum", enum_view),
    }
  }
}

/// Merge fields available to every item of a target.
pub(crate) fn version_fields(version: &ApiVersion, language: TargetLanguage) -> MergeFields {
  MergeFields::from([
    ("version", version.full().to_string()),
    ("version_dotted", version.dotted()),
    ("version_three_part", version.three_part()),
    ("language", language.as_str().to_string()),
  ])
}

fn render_items<'v>(kind: TemplateKind, view: &'v ApiView, version: &ApiVersion) -> Vec<RenderItem<'v>> {
  let base = version_fields(version, view.language);
  let with = |extra: &[(&'static str, &str)]| {
    let mut fields = base.clone();
    fields.extend(extra.iter().map(|(key, value)| (*key, (*value).to_string())));
    fields
  };

  match kind {
    TemplateKind::SingleFile => vec![RenderItem {
      binding: None,
      fields: base.clone(),
    }],
    TemplateKind::MethodCategories => view
      .categories
      .iter()
      .map(|category| RenderItem {
        binding: Some(Binding::Category(category)),
        fields: with(&[("name", category.name.as_str()), ("category", category.name.as_str())]),
      })
      .collect(),
    TemplateKind::Methods => view
      .operations
      .iter()
      .map(|operation| RenderItem {
        binding: Some(Binding::Operation(operation)),
        fields: with(&[
          ("name", operation.name.as_str()),
          ("category", operation.category.as_str()),
          ("verb", operation.verb.as_str()),
        ]),
      })
      .collect(),
    TemplateKind::Models | TemplateKind::UniqueModels | TemplateKind::FetchModels => view
      .models
      .iter()
      .filter(|model| match kind {
        TemplateKind::UniqueModels => !model.is_fetch_result,
        TemplateKind::FetchModels => model.is_fetch_result,
        _ => true,
      })
      .map(|model| RenderItem {
        binding: Some(Binding::Model(model)),
        fields: with(&[
          ("name", model.type_name.as_str()),
          ("schema_name", model.name.as_str()),
          ("inner", model.inner.as_deref().unwrap_or(&model.type_name)),
        ]),
      })
      .collect(),
    TemplateKind::Enums => view
      .enums
      .iter()
      .map(|enum_view| RenderItem {
        binding: Some(Binding::Enum(enum_view)),
        fields: with(&[("name", enum_view.type_name.as_str())]),
      })
      .collect(),
  }
}

/// Tera nests the useful detail in the error's source chain.
fn describe_tera_error(err: &tera::Error) -> String {
  let mut message = err.to_string();
  let mut source = err.source();
  while let Some(cause) = source {
    message.push_str(": ");
    message.push_str(&cause.to_string());
    source = cause.source();
  }
  message
}
