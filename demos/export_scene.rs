//! Export a small two-node scene to OBJ/MTL.
//!
//! Usage: cargo run --example export_scene -- [output.obj]

use glam::{Mat4, Vec3};
use scene_obj_exporter::{
    export_scene, ExportConfig, FileSystem, Material, MaterialKey, Mesh, Node, Scene, TextureType,
};

fn quad(name: &str) -> Mesh {
    Mesh::new(name)
        .with_positions([
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ])
        .with_normals([[0.0, 0.0, 1.0]; 4])
        .with_texture_coords([
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ])
        .with_face([0, 1, 2, 3])
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output = std::env::args().nth(1).unwrap_or_else(|| "scene.obj".to_string());

    let scene = Scene::new(
        Node::new("root")
            .with_child(Node::new("floor").with_mesh(0))
            .with_child(
                Node::new("wall")
                    .with_transform(
                        Mat4::from_translation(Vec3::new(0.0, 0.0, 1.0))
                            * Mat4::from_rotation_x(-std::f32::consts::FRAC_PI_2),
                    )
                    .with_mesh(1),
            ),
    )
    .with_mesh(quad("floor").with_material(0))
    .with_mesh(quad("wall").with_material(1))
    .with_material(
        Material::new()
            .with_name("tiles")
            .with_color(MaterialKey::ColorDiffuse, [0.8, 0.8, 0.8, 1.0])
            .with_texture(TextureType::Diffuse, "tiles.png"),
    )
    .with_material(
        Material::new()
            .with_color(MaterialKey::ColorDiffuse, [0.6, 0.3, 0.2, 1.0])
            .with_float(MaterialKey::Shininess, 32.0)
            .with_texture(TextureType::Height, "brick_height.png"),
    );

    export_scene("obj", &output, &mut FileSystem::new(), &scene, &ExportConfig::default())?;
    println!("Wrote {}", output);

    Ok(())
}
