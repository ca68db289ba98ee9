//! Documentation content for the cond CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Grammar,
    Operators,
    Values,
    Errors,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "grammar" | "syntax" => Some(Self::Grammar),
            "operators" | "ops" => Some(Self::Operators),
            "values" | "value" | "operands" => Some(Self::Values),
            "errors" | "error" => Some(Self::Errors),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"CONDITION DOCUMENTATION

A condition is a JSON object describing a SQL WHERE or ON clause. Every
condition is a single-key object whose key is an operator. cond checks that a
condition follows the grammar and shows the parse tree it produces.

DOCUMENTATION CATEGORIES

  grammar           The condition grammar and how the parse tree is shaped
  operators         Comparison, in, null and boolean operators
  values            Columns, parameters, numbers and null
  errors            How syntax errors are reported

QUICK REFERENCE

  {"$eq": {"name": ":name"}}              Comparison
  {"$in": {"id": [1, 2, 3]}}              Membership
  {"$is": {"deletedAt": null}}            Null test
  {"$and": [{...}, {...}]}                Logical combination

Run 'cond doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_str(name) {
        Some(DocCategory::Grammar) => Ok(GRAMMAR_DOC),
        Some(DocCategory::Operators) => Ok(OPERATORS_DOC),
        Some(DocCategory::Values) => Ok(VALUES_DOC),
        Some(DocCategory::Errors) => Ok(ERRORS_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const GRAMMAR_DOC: &str = r#"GRAMMAR - Condition Structure

  <condition>         ::= "{" <comparison> | <null-comparison> | <in-comparison> | <logical-condition> "}"
  <comparison>        ::= <comparison-operator> ":" "{" <column> ":" <value> "}"
  <null-comparison>   ::= <null-comparison-operator> ":" "{" <column> ":" <nullable> "}"
  <in-comparison>     ::= <in-comparison-operator> ":" "{" <column> ":" "[" <value> {"," <value>} "]" "}"
  <logical-condition> ::= <boolean-operator> ":" "[" <condition> {"," <condition>} "]"
  <nullable>          ::= null | <parameter>
  <value>             ::= <parameter> | <column> | <number>

PARSE TREE
  Braces, brackets, colons and commas are checked and dropped. Operators
  become internal nodes, operands become their children in order.

    Condition: {"$and": [{"$eq": {"a": ":x"}}, {"$gt": {"b": 5}}]}
    Tree:
      boolean-operator:$and
        comparison-operator:$eq
          column:a
          parameter::x
        comparison-operator:$gt
          column:b
          number:5

    Constraints:
      - Exactly one operator per object
      - Exactly one column per comparison object
      - Value and condition lists cannot be empty
"#;

const OPERATORS_DOC: &str = r#"OPERATORS

COMPARISON (column against one value)
  $eq  $neq  $lt  $lte  $gt  $gte  $like  $notlike

    Example:
      {"$gte": {"age": ":minAge"}}

IN-COMPARISON (column against a list of values)
  $in  $notIn

    Example:
      {"$notIn": {"status": [1, 2]}}

NULL-COMPARISON (column against null or a parameter)
  $is  $isnt

    Example:
      {"$isnt": {"deletedAt": null}}

BOOLEAN (list of conditions)
  $and  $or

    Example:
      {"$or": [{"$eq": {"a": 1}}, {"$is": {"b": null}}]}

  Operator names are case-sensitive. Any other string starting with $ is
  rejected by the tokenizer.
"#;

const VALUES_DOC: &str = r#"VALUES

COLUMN
  Any string that does not start with $ or :.
    "name"   "users.email"

PARAMETER
  A string starting with a colon, bound later by the query layer.
    ":name"   ":minAge"

NUMBER
  A JSON number. Values are kept as exact decimals.
    1   -2.50   1e3

NULL
  The null literal. Only allowed on the right side of $is / $isnt.

  Booleans are not part of the condition language.
"#;

const ERRORS_DOC: &str = r#"ERRORS

The first violation stops the parse. Errors name the token index (counting
every token, punctuation included), what was found, and what would have been
accepted.

MISMATCH
  {"$eq": {"name": }}
  At index 6.  Expected [parameter | column | number] but found type punctuation with value }.

PREMATURE END
  {"$eq": {"name": ":x"}
  At index 8.  Expected } but encountered the end of the sentence prematurely.

TRAILING INPUT
  {"$eq": {"name": ":x"}}, "extra"
  At index 9.  Expected EOL but found type punctuation with value ,.
"#;
