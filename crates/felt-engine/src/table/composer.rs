//! Builds the static table and the opening rack as paired objects.

use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3};

use crate::api::config::TableConfig;
use crate::api::error::TableError;
use crate::assets::textures::TableTextures;
use crate::components::light::AmbientLight;
use crate::components::mesh::{Geometry, MeshComponent, Shading, VisualMaterial};
use crate::components::node::RenderNode;
use crate::core::backend::{PhysicsBackend, SceneGraph};
use crate::core::body::{BodyDesc, ShapeDesc, SleepParams};
use crate::core::materials::MaterialRegistry;
use crate::core::paired::PairedObject;
use crate::table::rack::rack_layout;

/// Rails sit at `2·radius·RAIL_LIFT + rail_height/2`, putting their middle
/// near the ball equator.
pub const RAIL_LIFT: f32 = 0.635;

/// Extra height added to each rail's collision box (not its visual box).
/// Heuristic: a rail modelled at its true, very shallow height lets fast
/// balls tunnel over it.
pub const RAIL_INFLATION: f32 = 10.0;

pub const BALL_SLEEP: SleepParams = SleepParams {
    speed_limit: 1.0,
    time_limit: 1.0,
};

/// Constant per-tick drag on balls, so the table settles.
pub const BALL_DAMPING: f32 = 0.5;

/// Rack orientation: turns the texture seam of every racked ball the same way.
pub fn rack_orientation() -> Quat {
    Quat::from_axis_angle(Vec3::NEG_Y, FRAC_PI_2)
}

/// Floor orientation: the plane's +Z normal turned to +Y.
pub fn floor_orientation() -> Quat {
    Quat::from_axis_angle(Vec3::NEG_X, FRAC_PI_2)
}

/// Shared, read-only inputs of every object construction.
#[derive(Clone, Copy)]
pub struct BuildContext<'a> {
    pub config: &'a TableConfig,
    pub materials: &'a MaterialRegistry,
    pub textures: &'a TableTextures,
}

/// Everything needed to create one ball.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallSpec {
    /// 0 is the plain cue ball; 1..=15 pick the numbered texture.
    pub number: u8,
    pub position: Vec3,
    pub orientation: Quat,
    pub angular_velocity: Vec3,
}

/// The composed table.
#[derive(Debug, Clone)]
pub struct ComposedTable {
    pub floor: PairedObject,
    pub rails: [PairedObject; 4],
    /// Rack order; index 0 is the cue ball.
    pub balls: Vec<PairedObject>,
}

/// Register the contact pairs, the light, the floor, the four rails and the
/// 16-ball rack. Nothing is registered if the configuration is invalid.
pub fn compose_table<W, S>(world: &mut W, scene: &mut S, ctx: BuildContext<'_>) -> Result<ComposedTable, TableError>
where
    W: PhysicsBackend + ?Sized,
    S: SceneGraph + ?Sized,
{
    ctx.config.validate()?;

    for contact in ctx.materials.contact_materials() {
        world.add_contact_material(*contact);
    }
    scene.add_light(AmbientLight::default());

    let floor = spawn_floor(world, scene, ctx);
    let rails = spawn_rails(world, scene, ctx);

    let balls: Vec<PairedObject> = rack_layout(ctx.config.floor_length, ctx.config.ball_radius)
        .iter()
        .map(|placement| {
            let spec = BallSpec {
                number: placement.id,
                position: placement.position(),
                orientation: rack_orientation(),
                angular_velocity: Vec3::ZERO,
            };
            spawn_ball(world, scene, ctx, &spec)
        })
        .collect();

    log::info!(
        "table composed: {}x{} floor, 4 rails, {} balls ({} bodies, {} nodes)",
        ctx.config.floor_width,
        ctx.config.floor_length,
        balls.len(),
        world.body_count(),
        scene.len()
    );

    Ok(ComposedTable { floor, rails, balls })
}

fn felt_material(ctx: BuildContext<'_>) -> VisualMaterial {
    VisualMaterial::new(Shading::Standard {
        textures: ctx.textures.felt,
    })
    .with_double_sided(true)
}

fn spawn_floor<W, S>(world: &mut W, scene: &mut S, ctx: BuildContext<'_>) -> PairedObject
where
    W: PhysicsBackend + ?Sized,
    S: SceneGraph + ?Sized,
{
    let node = RenderNode::new(MeshComponent::new(
        Geometry::Plane {
            width: ctx.config.floor_width,
            height: ctx.config.floor_length,
        },
        felt_material(ctx),
    ))
    .with_tag("floor");

    let desc = BodyDesc::fixed(ShapeDesc::Plane)
        .with_orientation(floor_orientation())
        .with_material(ctx.materials.table_surface());

    PairedObject::register(world, scene, node, &desc)
}

/// Rail placement: visual box dimensions and center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RailLayout {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub center: Vec3,
}

impl RailLayout {
    /// Half extents of the collision box, inflated vertically.
    pub fn collision_half_extents(&self) -> Vec3 {
        Vec3::new(
            self.width / 2.0,
            (self.height + RAIL_INFLATION) / 2.0,
            self.depth / 2.0,
        )
    }
}

/// Left, right, far (-Z) and near (+Z) rails, just outside the floor edges.
pub fn rail_layouts(config: &TableConfig) -> [RailLayout; 4] {
    let y = config.ball_radius * 2.0 * RAIL_LIFT + config.rail_height / 2.0;
    let side_x = config.floor_width / 2.0 + config.rail_width / 2.0;
    let end_z = config.floor_length / 2.0 + config.rail_width / 2.0;

    let long_side = |x: f32| RailLayout {
        width: config.rail_width,
        height: config.rail_height,
        depth: config.floor_length,
        center: Vec3::new(x, y, 0.0),
    };
    let short_side = |z: f32| RailLayout {
        width: config.floor_width,
        height: config.rail_height,
        depth: config.rail_width,
        center: Vec3::new(0.0, y, z),
    };

    [long_side(-side_x), long_side(side_x), short_side(-end_z), short_side(end_z)]
}

fn spawn_rails<W, S>(world: &mut W, scene: &mut S, ctx: BuildContext<'_>) -> [PairedObject; 4]
where
    W: PhysicsBackend + ?Sized,
    S: SceneGraph + ?Sized,
{
    rail_layouts(ctx.config).map(|rail| {
        let node = RenderNode::new(MeshComponent::new(
            Geometry::Box {
                width: rail.width,
                height: rail.height,
                depth: rail.depth,
            },
            felt_material(ctx),
        ))
        .with_tag("rail");

        let desc = BodyDesc::fixed(ShapeDesc::Cuboid {
            half_extents: rail.collision_half_extents(),
        })
        .with_position(rail.center)
        .with_material(ctx.materials.table_wall());

        PairedObject::register(world, scene, node, &desc)
    })
}

/// Visual material of a ball: plain for the cue ball, numbered texture
/// otherwise. Inherits the current wireframe flag.
pub fn ball_material(ctx: BuildContext<'_>, number: u8) -> VisualMaterial {
    let shading = match ctx.textures.ball(number) {
        Some(texture) => Shading::Diffuse { texture },
        None => Shading::Basic,
    };
    VisualMaterial::new(shading).with_wireframe(ctx.config.show_wireframe)
}

/// Physical description of a ball.
pub fn ball_body(ctx: BuildContext<'_>, spec: &BallSpec) -> BodyDesc {
    BodyDesc::dynamic(
        ShapeDesc::Ball {
            radius: ctx.config.ball_radius,
        },
        ctx.config.ball_mass,
    )
    .with_position(spec.position)
    .with_orientation(spec.orientation)
    .with_angular_velocity(spec.angular_velocity)
    .with_material(ctx.materials.ball())
    .with_sleep(BALL_SLEEP)
    .with_linear_damping(BALL_DAMPING)
    .with_angular_damping(BALL_DAMPING)
}

/// Build and register one ball. Used by both the rack and the injector.
pub fn spawn_ball<W, S>(world: &mut W, scene: &mut S, ctx: BuildContext<'_>, spec: &BallSpec) -> PairedObject
where
    W: PhysicsBackend + ?Sized,
    S: SceneGraph + ?Sized,
{
    let node = RenderNode::new(MeshComponent::new(
        Geometry::Sphere {
            radius: ctx.config.ball_radius,
        },
        ball_material(ctx, spec.number),
    ))
    .with_tag(format!("ball-{}", spec.number));

    PairedObject::register(world, scene, node, &ball_body(ctx, spec))
}
