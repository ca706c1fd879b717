use std::collections::HashMap;

use leon::Template;

use crate::actions::GenerateAction;
use crate::error::Error::UnknownTemplateKey;
use crate::error::Result;

/// The only placeholder a message template may reference.
pub const MODEL_KEY: &str = "model";

/// Checks that a message template parses and only references `{model}`.
///
/// # Errors
///
/// Returns an error if the template is malformed or uses any other placeholder.
pub fn validate_model_template(action: GenerateAction, template: &str) -> Result<()> {
    let template = Template::parse(template)?;

    for key in template.keys() {
        if *key != MODEL_KEY {
            return Err(UnknownTemplateKey(action, (*key).to_string()));
        }
    }

    Ok(())
}

/// Renders `template` with the model name substituted for `{model}`.
///
/// # Errors
///
/// Returns an error if the template cannot be parsed or references a key other than `model`.
pub fn render_model_message(template: &str, model: &str) -> Result<String> {
    let template = Template::parse(template)?;

    let mut context: HashMap<String, String> = HashMap::new();
    context.insert(MODEL_KEY.to_string(), model.to_string());

    Ok(template.render(&context)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_render_substitutes_model_verbatim() {
        let rendered = render_model_message("DTOs for /{model} generated!", "Order Item").unwrap();
        assert_eq!(rendered, "DTOs for /Order Item generated!");
    }

    #[test]
    fn test_render_without_placeholder() {
        let rendered = render_model_message("Done", "User").unwrap();
        assert_eq!(rendered, "Done");
    }

    #[test]
    fn test_render_does_not_reinterpret_braces_in_model() {
        let rendered = render_model_message("Generating {model}...", "{weird}").unwrap();
        assert_eq!(rendered, "Generating {weird}...");
    }

    #[test]
    fn test_render_unknown_key_fails() {
        let result = render_model_message("Generating {entity}...", "User");
        assert!(matches!(result, Err(Error::Render(_))));
    }

    #[test]
    fn test_validate_accepts_model_placeholder() {
        assert!(validate_model_template(GenerateAction::Dto, "for /{model}").is_ok());
        assert!(validate_model_template(GenerateAction::Dto, "no placeholder").is_ok());
    }

    #[test]
    fn test_validate_rejects_other_placeholder() {
        let result = validate_model_template(GenerateAction::Mapper, "for /{entity}");
        match result {
            Err(UnknownTemplateKey(action, key)) => {
                assert_eq!(action, GenerateAction::Mapper);
                assert_eq!(key, "entity");
            }
            _ => panic!("Expected UnknownTemplateKey"),
        }
    }

    #[test]
    fn test_validate_rejects_unbalanced_braces() {
        let result = validate_model_template(GenerateAction::Test, "for /{model");
        assert!(matches!(result, Err(Error::Parse(_))));
    }
}
