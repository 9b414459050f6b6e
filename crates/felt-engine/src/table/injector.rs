//! Runtime ball synthesis ("drop balls").

use std::f32::consts::PI;
use std::ops::Range;

use glam::{Quat, Vec3};

use crate::core::backend::{PhysicsBackend, SceneGraph};
use crate::core::paired::PairedObject;
use crate::core::rng::RandomSource;
use crate::table::composer::{spawn_ball, BallSpec, BuildContext};
use crate::table::rack::RACK_SIZE;

/// Candidate spin axes. X appears twice, so it is picked twice as often.
pub const DROP_AXES: [Vec3; 3] = [Vec3::X, Vec3::Y, Vec3::X];

/// Bound on each component of a dropped ball's initial angular velocity.
pub const DROP_SPIN: f32 = 10.0;

/// Draw one random ball. Draw order: number, x, z, axis, angle, spin x/y/z.
pub fn random_ball<R>(rng: &mut R, ctx: BuildContext<'_>) -> BallSpec
where
    R: RandomSource + ?Sized,
{
    let number = rng.next_index(RACK_SIZE) as u8;
    let x = rng.symmetric(ctx.config.floor_width / 2.0);
    let z = rng.symmetric(ctx.config.floor_length / 2.0);
    let axis = DROP_AXES[rng.next_index(DROP_AXES.len())];
    let angle = PI * rng.symmetric(1.0);
    let spin = Vec3::new(
        rng.symmetric(DROP_SPIN),
        rng.symmetric(DROP_SPIN),
        rng.symmetric(DROP_SPIN),
    );

    BallSpec {
        number,
        position: Vec3::new(x, ctx.config.drop_height, z),
        orientation: Quat::from_axis_angle(axis, angle),
        angular_velocity: spin,
    }
}

/// Synthesize `ctx.config.drop_count` balls above the table and append them
/// to `balls`. Returns the index range of the new balls in `balls`.
///
/// Every new ball is fully registered (body, node and list entry) before the
/// call returns; a frame never observes a partial batch.
pub fn drop_balls<W, S, R>(
    world: &mut W,
    scene: &mut S,
    ctx: BuildContext<'_>,
    balls: &mut Vec<PairedObject>,
    rng: &mut R,
) -> Range<usize>
where
    W: PhysicsBackend + ?Sized,
    S: SceneGraph + ?Sized,
    R: RandomSource + ?Sized,
{
    let start = balls.len();
    let count = ctx.config.drop_count as usize;
    balls.reserve(count);

    for _ in 0..count {
        let spec = random_ball(rng, ctx);
        balls.push(spawn_ball(world, scene, ctx, &spec));
    }

    log::debug!("dropped {} balls, {} on the table", count, balls.len());
    start..balls.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::TableConfig;
    use crate::assets::textures::TableTextures;
    use crate::components::mesh::Shading;
    use crate::core::materials::MaterialRegistry;
    use crate::core::rng::Rng;
    use crate::core::scene::Scene;
    use crate::testing::{FakeWorld, ScriptedRandom};

    fn with_ctx<T>(config: TableConfig, f: impl FnOnce(BuildContext<'_>) -> T) -> T {
        let materials = MaterialRegistry::new();
        let textures = TableTextures::new();
        f(BuildContext {
            config: &config,
            materials: &materials,
            textures: &textures,
        })
    }

    #[test]
    fn draws_map_onto_ranges() {
        // 0.5 is the midpoint of every symmetric range.
        let mut rng = ScriptedRandom::new(vec![0.5]);
        let spec = with_ctx(TableConfig::default(), |ctx| random_ball(&mut rng, ctx));
        assert_eq!(spec.number, 8);
        assert_eq!(spec.position, Vec3::new(0.0, 3.0, 0.0));
        assert_eq!(spec.angular_velocity, Vec3::ZERO);
        // axis index 1 (Y), angle 0
        assert!(spec.orientation.abs_diff_eq(Quat::IDENTITY, 1e-6));
    }

    #[test]
    fn extreme_draws_stay_in_bounds() {
        let mut low = ScriptedRandom::new(vec![0.0]);
        let mut high = ScriptedRandom::new(vec![0.999_999]);
        let (a, b) = with_ctx(TableConfig::default(), |ctx| {
            (random_ball(&mut low, ctx), random_ball(&mut high, ctx))
        });

        assert_eq!(a.number, 0);
        assert!((a.position.x + 0.635).abs() < 1e-6);
        assert!((a.position.z + 1.27).abs() < 1e-6);
        assert!((a.angular_velocity.x + 10.0).abs() < 1e-5);

        assert_eq!(b.number, 15);
        assert!(b.position.x < 0.635 && b.position.z < 1.27);
        assert!(b.angular_velocity.max_element() < 10.0);
    }

    #[test]
    fn seeded_draws_cover_the_drop_area() {
        let mut rng = Rng::new(7);
        let config = TableConfig::default();
        let specs: Vec<_> = with_ctx(config.clone(), |ctx| {
            (0..500).map(|_| random_ball(&mut rng, ctx)).collect()
        });
        for spec in &specs {
            assert!(spec.position.x.abs() <= config.floor_width / 2.0);
            assert!(spec.position.z.abs() <= config.floor_length / 2.0);
            assert_eq!(spec.position.y, 3.0);
            assert!((spec.number as usize) < RACK_SIZE);
            assert!(spec.angular_velocity.abs().max_element() <= DROP_SPIN);
            assert!(spec.orientation.is_normalized());
        }
        let cue_balls = specs.iter().filter(|s| s.number == 0).count();
        assert!(cue_balls > 0, "ball 0 is a legal draw");
    }

    #[test]
    fn drop_appends_fully_registered_batch() {
        let mut world = FakeWorld::new(Vec3::ZERO);
        let mut scene = Scene::new();
        let mut balls = Vec::new();
        let mut rng = Rng::new(42);
        let config = TableConfig {
            drop_count: 4,
            ..TableConfig::default()
        };

        let range = with_ctx(config, |ctx| {
            drop_balls(&mut world, &mut scene, ctx, &mut balls, &mut rng);
            drop_balls(&mut world, &mut scene, ctx, &mut balls, &mut rng)
        });

        assert_eq!(range, 4..8);
        assert_eq!(balls.len(), 8);
        assert_eq!(world.body_count(), 8);
        assert_eq!(scene.len(), 8);
        for ball in &balls {
            assert!(ball.is_synced(&world, &scene, 1e-6));
        }
    }

    #[test]
    fn dropped_balls_use_ball_physics_and_textures() {
        let mut world = FakeWorld::new(Vec3::ZERO);
        let mut scene = Scene::new();
        let mut balls = Vec::new();
        // number draw 0.1 -> ball 1
        let mut rng = ScriptedRandom::new(vec![0.1, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5]);
        let config = TableConfig {
            drop_count: 1,
            show_wireframe: true,
            ..TableConfig::default()
        };
        with_ctx(config, |ctx| drop_balls(&mut world, &mut scene, ctx, &mut balls, &mut rng));

        let body = &world.bodies[balls[0].body().0 as usize];
        assert_eq!(body.desc.mass, 0.16);
        assert_eq!(body.desc.linear_damping, 0.5);
        assert!(body.desc.sleep.is_some());

        let node = scene.get(balls[0].node()).unwrap();
        assert!(matches!(node.mesh.material.shading, Shading::Diffuse { .. }));
        assert!(node.mesh.material.wireframe);
        assert_eq!(node.tag, "ball-1");
    }
}
