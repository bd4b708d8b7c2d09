use serde_json::json;

use crate::naming::identifiers::{
  IdentifierCase, clean_identifier, convert_case, enum_item_identifier, first_lower, first_upper, sanitize,
  stripped_identifier, synthesized_enum_name, type_identifier,
};

#[test]
fn test_clean_identifier_strips_markers() {
  let cases = [
    ("$filter", "filter"),
    ("$top", "top"),
    ("companyId", "companyId"),
    ("X-Avalara-Client", "X-Avalara-Client"),
    ("a.b.c", "a.b.c"),
    ("tax code (legacy)", "taxcodelegacy"),
    ("$", ""),
  ];
  for (input, expected) in cases {
    assert_eq!(clean_identifier(input), expected, "failed for input {input:?}");
  }
}

#[test]
fn test_stripped_identifier() {
  assert_eq!(stripped_identifier("a.b.c"), "c");
  assert_eq!(stripped_identifier("filter"), "filter");
  assert_eq!(stripped_identifier("model.lines"), "lines");
}

#[test]
fn test_sanitize() {
  let cases = [
    ("foo-bar", "foo_bar"),
    ("  spaced  out ", "spaced_out"),
    ("Café", "Cafe"),
    ("__a__b__", "a_b"),
    ("", ""),
  ];
  for (input, expected) in cases {
    assert_eq!(sanitize(input), expected, "failed for input {input:?}");
  }
}

#[test]
fn test_type_identifier() {
  assert_eq!(type_identifier("TransactionModel"), "TransactionModel");
  assert_eq!(type_identifier("FetchResult[CompanyModel]"), "FetchResultCompanyModel");
  assert_eq!(type_identifier("tax-rule"), "taxrule");
}

#[test]
fn test_enum_item_identifier() {
  let cases = [
    (json!("Sale"), "Sale"),
    (json!("sales-order"), "sales_order"),
    (json!("2fa"), "_2fa"),
    (json!("***"), "Unnamed"),
    (json!(3), "Value3"),
    (json!(-1), "ValueNegative1"),
    (json!(true), "True"),
    (json!(null), "Unnamed"),
  ];
  for (input, expected) in cases {
    assert_eq!(enum_item_identifier(&input), expected, "failed for input {input:?}");
  }
}

#[test]
fn test_synthesized_enum_name() {
  assert_eq!(synthesized_enum_name("Widget", "status"), "WidgetStatus");
  assert_eq!(synthesized_enum_name("TaxRule", "rate_type"), "TaxRuleRateType");
}

#[test]
fn test_convert_case() {
  let cases = [
    ("CompanyId", IdentifierCase::SnakeCase, "company_id"),
    ("company_id", IdentifierCase::CamelCase, "companyId"),
    ("company_id", IdentifierCase::PascalCase, "CompanyId"),
    ("companyId", IdentifierCase::ConstantCase, "COMPANY_ID"),
    ("companyId", IdentifierCase::KebabCase, "company-id"),
  ];
  for (input, case, expected) in cases {
    assert_eq!(convert_case(input, case).as_deref(), Some(expected), "failed for {input:?} as {case}");
  }
  assert_eq!(convert_case("$$", IdentifierCase::SnakeCase), None);
}

#[test]
fn test_first_character_case() {
  assert_eq!(first_upper("listCompanies"), "ListCompanies");
  assert_eq!(first_lower("ListCompanies"), "listCompanies");
  assert_eq!(first_upper(""), "");
  assert_eq!(first_lower(""), "");
}
