use crate::generator::{
  builder::BuildContext,
  document::{RawAdditionalProperties, RawSchema},
  errors::GeneratorError,
  metrics::GenerationWarning,
  model::TypeRef,
};

/// The entity that declares a schema, used to name enums declared inline.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SchemaOwner<'a> {
  pub owner: &'a str,
  pub member: &'a str,
}

impl<'a> SchemaOwner<'a> {
  pub(crate) fn new(owner: &'a str, member: &'a str) -> Self {
    Self { owner, member }
  }
}

impl BuildContext<'_> {
  /// Converts a raw schema into a type reference, registering any inline enum.
  pub(crate) fn type_ref(
    &mut self,
    schema: &RawSchema,
    owner: SchemaOwner<'_>,
    context: &str,
  ) -> Result<TypeRef, GeneratorError> {
    if let Some(reference) = &schema.reference {
      let (name, _) = self.resolver.resolve(reference, context)?;
      return Ok(TypeRef::named(name));
    }

    if let Some(values) = schema.enum_values.as_deref()
      && !values.is_empty()
    {
      let (name, merged) = self.enums.register(schema, values, owner, context)?;
      if merged {
        self.warnings.push(GenerationWarning::EnumValuesMerged {
          enum_name: name.clone(),
          context: context.to_string(),
        });
      }
      return Ok(TypeRef::named(name));
    }

    match schema.schema_type.as_deref() {
      Some("array") => {
        let items = schema
          .items
          .as_deref()
          .ok_or_else(|| GeneratorError::inconsistent(context, "array schema declares no items"))?;
        Ok(TypeRef::array(self.type_ref(items, owner, context)?))
      }
      Some("object") => self.object_type_ref(schema, owner, context),
      None if !schema.properties.is_empty() || schema.additional_properties.is_some() => {
        self.object_type_ref(schema, owner, context)
      }
      None => Ok(TypeRef::primitive("object", None)),
      Some(name) => Ok(TypeRef::primitive(name, schema.format.as_deref())),
    }
  }

  /// Objects without named properties are string-keyed maps; inline objects with
  /// properties have no named type to point at and degrade to an untyped object.
  fn object_type_ref(
    &mut self,
    schema: &RawSchema,
    owner: SchemaOwner<'_>,
    context: &str,
  ) -> Result<TypeRef, GeneratorError> {
    match &schema.additional_properties {
      Some(RawAdditionalProperties::Schema(value)) => Ok(TypeRef::map(self.type_ref(value, owner, context)?)),
      Some(RawAdditionalProperties::Allowed(true)) => Ok(TypeRef::map(TypeRef::primitive("object", None))),
      _ if schema.properties.is_empty() => Ok(TypeRef::map(TypeRef::string())),
      _ => {
        self.warnings.push(GenerationWarning::InlineObjectFlattened {
          context: context.to_string(),
        });
        Ok(TypeRef::primitive("object", None))
      }
    }
  }
}
