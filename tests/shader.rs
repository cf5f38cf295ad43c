use tumble::rendering::SCENE_SHADER;
use tumble::utils::validate_wgsl_source;

#[test]
fn scene_shader_is_valid() {
    if let Err(e) = validate_wgsl_source(SCENE_SHADER) {
        panic!("{e}");
    }
}

#[test]
fn broken_shader_is_rejected() {
    assert!(validate_wgsl_source("fn main( {").is_err());
}
