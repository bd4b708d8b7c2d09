use std::path::{Path, PathBuf};

use serde_json::json;
use strum::IntoEnumIterator;

use crate::{
  generator::{
    builder::ModelBuilder,
    document::RawDocument,
    errors::GeneratorError,
    languages::TargetLanguage,
    model::ApiModel,
    render::{
      LoadedTemplate, RenderedArtifact, Renderer,
      builtin::{default_target, template, template_names},
      target::{RenderTarget, TemplateKind, TemplateSource, TemplateTask},
    },
  },
  utils::document::{DocumentFormat, parse_document},
};

const WIDGETS: &str = include_str!("../../../../fixtures/widgets.json");
const TAX_SERVICE: &str = include_str!("../../../../fixtures/tax_service.json");

fn fixture_model(source: &str) -> ApiModel {
  let document = parse_document(source.as_bytes(), DocumentFormat::Json).unwrap();
  ModelBuilder::new(&document).build().unwrap().model
}

fn model_from(paths: serde_json::Value, definitions: serde_json::Value) -> ApiModel {
  let document: RawDocument = serde_json::from_value(json!({
    "swagger": "2.0",
    "info": { "title": "Things", "version": "1.0.0" },
    "paths": paths,
    "definitions": definitions,
  }))
  .unwrap();
  ModelBuilder::new(&document).build().unwrap().model
}

fn render_builtin(language: TargetLanguage, model: &ApiModel) -> Vec<RenderedArtifact> {
  Renderer::with_builtin_templates(default_target(language, Path::new("out")))
    .unwrap()
    .render(model)
    .unwrap()
}

fn artifact<'a>(artifacts: &'a [RenderedArtifact], path: &str) -> &'a str {
  artifacts
    .iter()
    .find(|artifact| artifact.path == Path::new(path))
    .map(|artifact| artifact.contents.as_str())
    .unwrap_or_else(|| panic!("no artifact at {path}"))
}

#[test]
fn test_every_default_template_is_builtin() {
  for language in TargetLanguage::iter() {
    for task in default_target(language, Path::new("out")).templates {
      let TemplateSource::Builtin(name) = &task.source else {
        panic!("default target for {language} uses a file template");
      };
      assert!(template(name).is_some(), "missing built-in template {name}");
    }
  }
  assert_eq!(template_names().count(), 16);
}

#[test]
fn test_widget_csharp() {
  let model = fixture_model(WIDGETS);
  let artifacts = render_builtin(TargetLanguage::CSharp, &model);

  let paths: Vec<&Path> = artifacts.iter().map(|artifact| artifact.path.as_path()).collect();
  assert_eq!(
    paths,
    vec![Path::new("out/csharp/ApiClient.cs"), Path::new("out/csharp/models/Widget.cs")]
  );

  let client = artifact(&artifacts, "out/csharp/ApiClient.cs");
  assert!(client.contains("#region Widgets"));
  assert!(client.contains("public async Task<Widget> GetWidgetAsync(Int32 id)"));
  assert!(client.contains("path.ApplyField(\"id\", id);"));
  assert!(client.contains("return await RestCallAsync<Widget>(\"Get\", path, null)"));
  assert!(client.contains("Generated REST client, API version 1.2.0."));

  let widget = artifact(&artifacts, "out/csharp/models/Widget.cs");
  assert!(widget.contains("    /// <summary>\n    /// A widget.\n    /// </summary>"));
  assert!(widget.contains("public Int32? Id { get; private set; }"));
  assert!(widget.contains("public String Class { get; set; }"));
}

#[test]
fn test_widget_java_renames_reserved_property() {
  let model = fixture_model(WIDGETS);
  let artifacts = render_builtin(TargetLanguage::Java, &model);

  let widget = artifact(&artifacts, "out/java/models/Widget.java");
  assert!(widget.contains("private String classField;"));
  assert!(widget.contains("public String getClassField() {"));
  assert!(widget.contains("public void setClassField(String value) {"));
}

#[test]
fn test_widget_python_renames_reserved_parameter() {
  let model = fixture_model(WIDGETS);
  let artifacts = render_builtin(TargetLanguage::Python, &model);

  let methods = artifact(&artifacts, "out/python/client_methods.py");
  assert!(methods.contains("def get_widget(self, id_field) -> \"Widget\":"));
  assert!(methods.contains(".replace(\"{id}\", str(id_field))"));
  assert!(methods.contains(":param id_field: [int]"));
}

#[test]
fn test_parameters_reserved_only_after_case_conversion() {
  let model = model_from(
    json!({
      "/things": {
        "get": {
          "operationId": "ListThings",
          "parameters": [
            { "name": "Class", "in": "query", "type": "string" },
            { "name": "Default", "in": "query", "type": "string" },
            { "name": "region", "in": "query", "type": "string" }
          ],
          "responses": { "200": { "description": "ok" } }
        }
      }
    }),
    json!({}),
  );

  let python = render_builtin(TargetLanguage::Python, &model);
  let methods = artifact(&python, "out/python/client_methods.py");
  assert!(methods.contains("def list_things(self, class_field, default, region)"));
  assert!(methods.contains("\"Class\": class_field"));

  let java = render_builtin(TargetLanguage::Java, &model);
  let client = artifact(&java, "out/java/ApiClient.java");
  assert!(client.contains("listThings(String classField, String defaultField, String region)"));
  assert!(client.contains("path.addQuery(\"Default\", defaultField);"));

  let csharp = render_builtin(TargetLanguage::CSharp, &model);
  let client = artifact(&csharp, "out/csharp/ApiClient.cs");
  assert!(client.contains("ListThingsAsync(String Class, String Default, String region)"));
}

#[test]
fn test_renamed_property_does_not_shadow_its_neighbour() {
  let model = model_from(
    json!({}),
    json!({
      "Thing": {
        "type": "object",
        "properties": {
          "class": { "type": "string" },
          "classField": { "type": "string" }
        }
      }
    }),
  );

  let java = render_builtin(TargetLanguage::Java, &model);
  let thing = artifact(&java, "out/java/models/Thing.java");
  assert!(thing.contains("private String classField;"));
  assert!(thing.contains("private String classField2;"));
  assert!(thing.contains("public String getClassField2() {"));

  let csharp = render_builtin(TargetLanguage::CSharp, &model);
  let thing = artifact(&csharp, "out/csharp/models/Thing.cs");
  assert!(thing.contains("public String Class { get; set; }"));
  assert!(thing.contains("public String ClassField { get; set; }"));
}

#[test]
fn test_every_language_renders_tax_service() {
  let model = fixture_model(TAX_SERVICE);

  for language in TargetLanguage::iter() {
    let artifacts = render_builtin(language, &model);
    assert!(!artifacts.is_empty(), "{language} produced nothing");

    for artifact in &artifacts {
      assert!(
        artifact.path.starts_with(Path::new("out").join(language.as_str())),
        "{} escapes the target root",
        artifact.path.display()
      );
      assert!(!artifact.contents.trim().is_empty(), "{} is empty", artifact.path.display());
      for dangling in [", )", "(, ", ",)"] {
        assert!(
          !artifact.contents.contains(dangling),
          "{} contains a dangling separator {dangling:?}",
          artifact.path.display()
        );
      }
    }
  }
}

#[test]
fn test_render_is_deterministic() {
  let model = fixture_model(TAX_SERVICE);
  for language in TargetLanguage::iter() {
    assert_eq!(render_builtin(language, &model), render_builtin(language, &model));
  }
}

#[test]
fn test_apex_layout() {
  let model = fixture_model(TAX_SERVICE);
  let artifacts = render_builtin(TargetLanguage::Apex, &model);
  let paths: Vec<PathBuf> = artifacts.iter().map(|artifact| artifact.path.clone()).collect();

  assert!(paths.contains(&PathBuf::from("out/apex/classes/FetchResultLocationModel.cls")));
  assert!(paths.contains(&PathBuf::from("out/apex/classes/DocumentType.cls")));
  assert!(!paths.contains(&PathBuf::from("out/apex/classes/FetchResult.cls")));

  let line = artifact(&artifacts, "out/apex/classes/LineItemModel.cls");
  assert!(line.contains("numberField"));
}

#[test]
fn test_ruby_file_per_category() {
  let model = fixture_model(TAX_SERVICE);
  let artifacts = render_builtin(TargetLanguage::Ruby, &model);
  let paths: Vec<&Path> = artifacts.iter().map(|artifact| artifact.path.as_path()).collect();

  assert_eq!(
    paths,
    vec![
      Path::new("out/ruby/lib/client/locations.rb"),
      Path::new("out/ruby/lib/client/transactions.rb"),
      Path::new("out/ruby/lib/client/uncategorized.rb"),
      Path::new("out/ruby/lib/client/utilities.rb"),
    ]
  );
}

fn single_template_target(kind: TemplateKind, output: &str) -> RenderTarget {
  RenderTarget::builder()
    .name("custom")
    .language(TargetLanguage::CSharp)
    .root_folder("out")
    .templates(vec![
      TemplateTask::builder()
        .source(TemplateSource::Builtin("custom/sample".to_string()))
        .kind(kind)
        .output(output)
        .build(),
    ])
    .build()
}

fn loaded(text: &str) -> Vec<LoadedTemplate> {
  vec![LoadedTemplate {
    name: "custom/sample".to_string(),
    text: text.to_string(),
  }]
}

#[test]
fn test_custom_template_per_enum() {
  let model = fixture_model(TAX_SERVICE);
  let target = single_template_target(TemplateKind::Enums, "{name.snake}.txt");
  let renderer = Renderer::new(target, loaded("{{ enum.type }}:{% for item in enum.items %} {{ item.name }}{% endfor %}"))
    .unwrap();

  let artifacts = renderer.render(&model).unwrap();
  let document_type = artifacts
    .iter()
    .find(|artifact| artifact.path == Path::new("out/document_type.txt"))
    .unwrap();
  assert_eq!(
    document_type.contents,
    "DocumentType: SalesOrder SalesInvoice ReturnInvoice InventoryTransferOrder"
  );
}

#[test]
fn test_duplicate_output_paths_fail_the_target() {
  let model = fixture_model(TAX_SERVICE);
  let target = single_template_target(TemplateKind::UniqueModels, "models/same.cs");
  let failure = Renderer::new(target, loaded("{{ model.type }}"))
    .unwrap()
    .render(&model)
    .unwrap_err();

  assert_eq!(failure.target, "custom");
  assert!(failure.errors[0].to_string().contains("is produced more than once"));
}

#[test]
fn test_template_syntax_error() {
  let target = single_template_target(TemplateKind::SingleFile, "out.txt");
  let failure = Renderer::new(target, loaded("{{ unclosed")).unwrap_err();

  assert_eq!(failure.errors.len(), 1);
  assert!(matches!(
    &failure.errors[0],
    GeneratorError::TemplateRender { template, .. } if template == "custom/sample"
  ));
}

#[test]
fn test_missing_variable_is_a_render_error() {
  let model = fixture_model(WIDGETS);
  let target = single_template_target(TemplateKind::SingleFile, "out.txt");
  let failure = Renderer::new(target, loaded("{{ nowhere.to_be_found }}"))
    .unwrap()
    .render(&model)
    .unwrap_err();

  assert_eq!(failure.errors.len(), 1);
}

#[test]
fn test_unknown_builtin_template() {
  let err = LoadedTemplate::builtin("custom", &TemplateSource::Builtin("cobol/client".to_string())).unwrap_err();
  assert_eq!(
    err.to_string(),
    "target 'custom', template 'cobol/client': no built-in template with this name"
  );
}

#[test]
fn test_unmapped_types_fail_only_that_target() {
  let model = model_from(
    json!({}),
    json!({
      "Big": { "type": "object", "properties": { "n": { "type": "integer", "format": "int128" } } }
    }),
  );

  let failure = Renderer::with_builtin_templates(default_target(TargetLanguage::CSharp, Path::new("out")))
    .unwrap()
    .render(&model)
    .unwrap_err();
  assert!(matches!(
    &failure.errors[0],
    GeneratorError::UnmappedType { type_name, .. } if type_name == "integer(int128)"
  ));
}
