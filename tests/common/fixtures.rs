//! Reusable fixture content for restack tests.

/// Template with one parameter of each resolution class: prompted,
/// defaulted, and numeric-defaulted.
pub const CORE_TEMPLATE: &str = r#"Description: Core application stack
Parameters:
  RequiredStringParameter:
    Type: String
  DefaultStringParameter:
    Type: String
    Default: quux
  NumericParameter:
    Type: Number
    Default: 17
Resources:
  Bucket:
    Type: AWS::S3::Bucket
"#;

/// Template with no parameter section at all
pub const PLAIN_TEMPLATE: &str = r#"Description: Stack without parameters
Resources:
  Topic:
    Type: AWS::SNS::Topic
"#;

/// Config selecting a named environment and no deploy commands
pub const STAGING_CONFIG: &str = r#"[environment]
name = "staging"
account_id = "123456789012"
region = "eu-west-1"
"#;
