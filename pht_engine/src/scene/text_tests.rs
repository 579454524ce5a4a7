use std::sync::Arc;
use super::*;
use crate::renderer::mock_renderer::MockMaterial;

fn font() -> Arc<dyn Material> {
    Arc::new(MockMaterial {
        name: "font".to_string(),
        shader_id: 9,
        material_id: 90,
        depth_write: false,
    })
}

#[test]
fn test_plain_text_has_single_pass() {
    let props = TextProperties::new(font());
    let passes: Vec<TextKind> = props.pass_kinds().collect();
    assert_eq!(passes, vec![TextKind::Text]);
}

#[test]
fn test_main_pass_follows_gradient_options() {
    let mut props = TextProperties::new(font());
    assert_eq!(props.main_pass_kind(), TextKind::Text);

    props.effects = TextEffects::GRADIENT_TOP;
    assert_eq!(props.main_pass_kind(), TextKind::GradientTop);

    props.effects = TextEffects::GRADIENT_MID;
    assert_eq!(props.main_pass_kind(), TextKind::GradientMid);

    props.effects = TextEffects::GRADIENT_TOP | TextEffects::GRADIENT_MID;
    assert_eq!(props.main_pass_kind(), TextKind::GradientTopMid);
}

#[test]
fn test_all_effects_give_four_passes_in_order() {
    let mut props = TextProperties::new(font());
    props.effects = TextEffects::all();

    let passes: Vec<TextKind> = props.pass_kinds().collect();
    assert_eq!(
        passes,
        vec![
            TextKind::SecondShadow,
            TextKind::Shadow,
            TextKind::Specular,
            TextKind::GradientTopMid,
        ]
    );
}

#[test]
fn test_kind_ordinals_put_shadows_highest() {
    assert!(TextKind::SecondShadow > TextKind::Shadow);
    assert!(TextKind::Shadow > TextKind::Specular);
    assert!(TextKind::Specular > TextKind::GradientTopMid);
    assert!(TextKind::GradientTop > TextKind::Text);
    assert!(TextKind::GradientMid.is_main_pass());
    assert!(!TextKind::Shadow.is_main_pass());
}

#[test]
fn test_set_text_replaces_content() {
    let mut text = TextComponent::new("SCORE", TextProperties::new(font()));
    assert_eq!(text.text(), "SCORE");
    text.set_text("LEVEL 2");
    assert_eq!(text.text(), "LEVEL 2");
    text.properties_mut().size = 2.0;
    assert_eq!(text.properties().size, 2.0);
}
