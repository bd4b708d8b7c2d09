use std::collections::HashMap;

use indexmap::IndexMap;
use serde_json::Value;

use crate::{
  generator::{
    builder::types::SchemaOwner,
    document::{RawEnumItemMetadata, RawSchema},
    errors::GeneratorError,
    model::{Deprecation, EnumDef, EnumItem, Primitive},
  },
  naming::identifiers::{enum_item_identifier, synthesized_enum_name},
};

/// Collects enums in first-encounter order, merging declarations that share a name.
#[derive(Debug, Default)]
pub(crate) struct EnumRegistry {
  enums: IndexMap<String, EnumDef>,
}

impl EnumRegistry {
  /// Registers an inline enum and returns its name, plus whether an existing enum gained
  /// values from this declaration.
  ///
  /// The name comes from `x-enum-type`, then `x-ms-enum.name`, then the owner and member
  /// names.
  pub(crate) fn register(
    &mut self,
    schema: &RawSchema,
    values: &[Value],
    owner: SchemaOwner<'_>,
    context: &str,
  ) -> Result<(String, bool), GeneratorError> {
    let name = schema
      .declared_enum_name()
      .map_or_else(|| synthesized_enum_name(owner.owner, owner.member), str::to_string);
    let data_type = Primitive::new(
      schema.schema_type.as_deref().unwrap_or("string"),
      schema.format.as_deref(),
    );
    let items = build_items(values, schema.enum_metadata.as_deref().unwrap_or_default(), &name, context)?;

    let Some(existing) = self.enums.get_mut(&name) else {
      self.enums.insert(
        name.clone(),
        EnumDef {
          name: name.clone(),
          data_type,
          summary: schema.description.clone(),
          items,
        },
      );
      return Ok((name, false));
    };

    if existing.data_type.name != data_type.name {
      return Err(GeneratorError::inconsistent(
        context,
        format!(
          "enum '{name}' is declared as '{}' here but as '{}' elsewhere",
          data_type.name, existing.data_type.name
        ),
      ));
    }

    let mut merged = false;
    for item in items {
      if existing.items.iter().any(|known| known.value == item.value) {
        continue;
      }
      if existing.items.iter().any(|known| known.name == item.name) {
        return Err(duplicate_item_name(&name, &item.name, context));
      }
      existing.items.push(item);
      merged = true;
    }
    if existing.summary.is_none() {
      existing.summary.clone_from(&schema.description);
    }

    Ok((name, merged))
  }

  pub(crate) fn into_enums(self) -> IndexMap<String, EnumDef> {
    self.enums
  }
}

/// Builds items in declared order. Repeated values collapse to their first occurrence.
fn build_items(
  values: &[Value],
  metadata: &[RawEnumItemMetadata],
  enum_name: &str,
  context: &str,
) -> Result<Vec<EnumItem>, GeneratorError> {
  let mut items: Vec<EnumItem> = Vec::with_capacity(values.len());
  let mut names: HashMap<String, Value> = HashMap::new();

  for value in values {
    if items.iter().any(|item| &item.value == value) {
      continue;
    }

    let meta = metadata.iter().find(|meta| &meta.value == value);
    let name = meta
      .and_then(|meta| meta.name.as_deref())
      .map(|declared| enum_item_identifier(&Value::String(declared.to_string())))
      .unwrap_or_else(|| enum_item_identifier(value));

    if let Some(previous) = names.insert(name.clone(), value.clone())
      && &previous != value
    {
      return Err(duplicate_item_name(enum_name, &name, context));
    }

    items.push(EnumItem {
      name,
      value: value.clone(),
      summary: meta.and_then(|meta| meta.summary.clone()),
      deprecation: meta.and_then(|meta| meta.deprecation.as_ref()).map(|raw| Deprecation {
        date: raw.date.clone(),
        version: raw.version.clone(),
        message: raw.message.clone(),
      }),
    });
  }

  Ok(items)
}

fn duplicate_item_name(enum_name: &str, item_name: &str, context: &str) -> GeneratorError {
  GeneratorError::inconsistent(
    context,
    format!("enum '{enum_name}' derives item name '{item_name}' from more than one value"),
  )
}
