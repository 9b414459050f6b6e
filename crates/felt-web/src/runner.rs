use felt_engine::systems::render::build_render_buffer;
use felt_engine::{
    InputEvent, InputQueue, MeshInstance, RapierTable, RenderBuffer, Rng, SceneGraph, TableConfig, TableError,
    Trigger,
};

/// Drives one rapier-backed table from the browser's frame callback.
///
/// The JS side owns the canvas and the renderer; this side owns the
/// session and hands the renderer a flat instance buffer each frame.
pub struct TableRunner {
    session: RapierTable,
    input: InputQueue,
    rng: Rng,
    render_buffer: RenderBuffer,
}

impl TableRunner {
    pub fn new(config: TableConfig, seed: u64) -> Result<Self, TableError> {
        let session = RapierTable::with_rapier(config)?;
        let mut render_buffer = RenderBuffer::with_capacity(session.scene().len() * 2);
        build_render_buffer(session.scene().iter(), &mut render_buffer);

        Ok(Self {
            session,
            input: InputQueue::new(),
            rng: Rng::new(seed),
            render_buffer,
        })
    }

    /// Queue a host event; it is handled on the next tick.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: dispatch queued triggers, step and sync the table,
    /// rebuild the instance buffer.
    pub fn tick(&mut self, dt: f32) -> Result<u32, TableError> {
        for event in self.input.drain() {
            let Some(trigger) = Trigger::from_event(&event) else {
                continue;
            };
            // A rejected panel value must not stall the frame loop.
            if let Err(err) = self.session.handle_trigger(trigger, &mut self.rng) {
                log::warn!("{:?} ignored: {}", trigger, err);
            }
        }

        let steps = self.session.tick(dt)?;
        build_render_buffer(self.session.scene().iter(), &mut self.render_buffer);
        Ok(steps)
    }

    pub fn set_options(&mut self, json: &str) -> Result<(), TableError> {
        self.session.apply_options_json(json)
    }

    /// Texture catalog as JSON. Instance `texture` fields index into it.
    pub fn texture_manifest(&self) -> Result<String, TableError> {
        Ok(self.session.textures().catalog.to_json()?)
    }

    pub fn session(&self) -> &RapierTable {
        &self.session
    }

    // ---- Pointer accessors for reads from JS memory ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn instance_floats(&self) -> u32 {
        MeshInstance::FLOATS as u32
    }

    pub fn ball_count(&self) -> u32 {
        self.session.balls().len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner() -> TableRunner {
        TableRunner::new(TableConfig::default(), 1234).unwrap()
    }

    #[test]
    fn buffer_ready_before_first_tick() {
        let r = runner();
        assert_eq!(r.instance_count(), 21);
        assert_eq!(r.instance_floats(), 16);
    }

    #[test]
    fn drop_event_grows_buffer_on_next_tick() {
        let mut r = runner();
        r.push_input(InputEvent::Custom { kind: 1, a: 0.0, b: 0.0, c: 0.0 });
        assert_eq!(r.ball_count(), 16, "events wait for the tick");

        r.tick(1.0 / 60.0).unwrap();
        assert_eq!(r.ball_count(), 26);
        assert_eq!(r.instance_count(), 31);
    }

    #[test]
    fn unknown_events_are_dropped() {
        let mut r = runner();
        r.push_input(InputEvent::KeyDown { key_code: 65 });
        r.push_input(InputEvent::Custom { kind: 42, a: 1.0, b: 0.0, c: 0.0 });
        r.tick(1.0 / 60.0).unwrap();
        assert_eq!(r.ball_count(), 16);
        r.tick(1.0 / 60.0).unwrap();
        assert_eq!(r.ball_count(), 16);
    }

    #[test]
    fn panel_events_reach_the_config() {
        let mut r = runner();
        r.push_input(InputEvent::Custom { kind: 4, a: 30.0, b: 0.0, c: 0.0 });
        r.push_input(InputEvent::Custom { kind: 5, a: 2.0, b: 0.0, c: 0.0 });
        r.push_input(InputEvent::Custom { kind: 3, a: 1.0, b: 0.0, c: 0.0 });
        r.tick(1.0 / 60.0).unwrap();

        let config = r.session().config();
        assert_eq!(config.cue_force, 30.0);
        assert_eq!(config.drop_count, 2);
        assert!(config.show_wireframe);
    }

    #[test]
    fn space_strikes_the_cue() {
        let mut r = runner();
        r.push_input(InputEvent::KeyDown { key_code: 32 });
        r.tick(1.0 / 60.0).unwrap();
        let cue = r.session().cue_ball().body();
        let v = felt_engine::PhysicsBackend::linear_velocity(r.session().world(), cue).unwrap();
        assert!(v.z < 0.0);
    }

    #[test]
    fn options_json_and_manifest() {
        let mut r = runner();
        r.set_options(r#"{"cueForce": 12}"#).unwrap();
        assert_eq!(r.session().config().cue_force, 12.0);
        assert!(r.set_options("not json").is_err());

        let manifest = r.texture_manifest().unwrap();
        assert!(manifest.contains("/textures/felt/diffuse.png"));
        assert!(manifest.contains("/textures/balls/15.jpg"));
    }
}
