use tera::{Context, Tera};

use crate::generator::{
  languages::{CommentStyle, TargetLanguage},
  render::helpers::{backtrack, format_comment, register_filters, verb_literal},
};

#[test]
fn test_format_comment_styles() {
  let text = "Lists locations.\n\nUse <filter> & paging.";

  assert_eq!(
    format_comment(text, CommentStyle::XmlDoc, 8),
    "        /// Lists locations.\n        ///\n        /// Use &lt;filter&gt; &amp; paging."
  );
  assert_eq!(
    format_comment(text, CommentStyle::Hash, 2),
    "  # Lists locations.\n  #\n  # Use <filter> & paging."
  );
  assert_eq!(
    format_comment("Ends a block */ early", CommentStyle::Block, 4),
    "     * Ends a block *&#47; early"
  );
  assert_eq!(format_comment("  one line  ", CommentStyle::Docstring, 0), "one line");
}

#[test]
fn test_verb_literal() {
  assert_eq!(verb_literal("get"), "Get");
  assert_eq!(verb_literal("DELETE"), "Delete");
  assert_eq!(verb_literal(""), "");
}

#[test]
fn test_backtrack() {
  assert_eq!(backtrack("a, b, ", 2), "a, b");
  assert_eq!(backtrack("ab", 5), "");
  assert_eq!(backtrack("naïve", 1), "naïv");
}

fn render_with_filters(language: TargetLanguage, template: &str, context: &Context) -> tera::Result<String> {
  let mut tera = Tera::default();
  register_filters(&mut tera, language);
  tera.add_raw_template("inline", template)?;
  tera.render("inline", context)
}

#[test]
fn test_case_filters() {
  let mut context = Context::new();
  context.insert("name", "CreateTransaction");
  context.insert("field", "companyId");

  let rendered = render_with_filters(
    TargetLanguage::Python,
    "{{ name | snake_case }} {{ field | camel_case }} {{ field | pascal_case }} {{ field | constant_case }} \
     {{ field | first_upper }} {{ name | first_lower }}",
    &context,
  )
  .unwrap();
  assert_eq!(
    rendered,
    "create_transaction companyId CompanyId COMPANY_ID CompanyId createTransaction"
  );
}

#[test]
fn test_comment_filter_uses_language_style() {
  let mut context = Context::new();
  context.insert("doc", "First\nSecond");

  let ruby = render_with_filters(TargetLanguage::Ruby, "{{ doc | comment(indent=4) }}", &context).unwrap();
  assert_eq!(ruby, "    # First\n    # Second");

  let java = render_with_filters(TargetLanguage::Java, "{{ doc | comment }}", &context).unwrap();
  assert_eq!(java, " * First\n * Second");
}

#[test]
fn test_filter_argument_errors() {
  let mut context = Context::new();
  context.insert("count", &3);
  context.insert("empty", "$$");

  assert!(render_with_filters(TargetLanguage::CSharp, "{{ count | snake_case }}", &context).is_err());
  assert!(render_with_filters(TargetLanguage::CSharp, "{{ empty | pascal_case }}", &context).is_err());
  assert!(render_with_filters(TargetLanguage::CSharp, "{{ 'abc' | backtrack(count=\"x\") }}", &context).is_err());
}
