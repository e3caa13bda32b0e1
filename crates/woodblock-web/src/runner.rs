use woodblock_engine::{
    FixedTimestep, GameEvent, InputEvent, InputQueue, SurfaceCanvas, SurfaceVertex, Workshop,
    WorkshopConfig,
};

/// Wires the workshop to the host frame loop.
///
/// `lib.rs` keeps one in a `thread_local!` and exports free functions that
/// forward to it.
pub struct WorkshopRunner {
    workshop: Workshop,
    input: InputQueue,
    timestep: FixedTimestep,
    canvas: SurfaceCanvas,
    /// Events of the last frame, read by the host as packed floats.
    events: Vec<GameEvent>,
}

impl WorkshopRunner {
    pub fn new(config: WorkshopConfig) -> Self {
        let timestep = FixedTimestep::new(config.fixed_dt);
        let canvas = SurfaceCanvas::new(config.max_vertices);
        Self {
            workshop: Workshop::new(config),
            input: InputQueue::new(),
            timestep,
            canvas,
            events: Vec::new(),
        }
    }

    /// Build a runner from a (possibly partial) JSON config.
    /// Malformed JSON falls back to the defaults.
    pub fn from_json(config_json: &str) -> Self {
        let config = if config_json.trim().is_empty() {
            WorkshopConfig::default()
        } else {
            WorkshopConfig::from_json(config_json).unwrap_or_else(|err| {
                log::warn!("{err}; using default configuration");
                WorkshopConfig::default()
            })
        };
        Self::new(config)
    }

    pub fn workshop(&self) -> &Workshop {
        &self.workshop
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    pub fn set_display_size(&mut self, width: f32, height: f32) {
        self.workshop.set_display_size(width, height);
    }

    /// Run one frame: apply queued input, step timers, rebuild the surface.
    pub fn tick(&mut self, dt: f32) {
        for event in self.input.drain() {
            if let Err(err) = self.workshop.handle_input(event) {
                log::warn!("{err}");
            }
        }

        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.workshop.tick(self.timestep.dt());
        }

        self.canvas.clear();
        self.workshop.render(&mut self.canvas);

        self.events = self.workshop.drain_events();
    }

    // ---- JSON accessors ----

    pub fn state_json(&self) -> String {
        to_json(self.workshop.state())
    }

    pub fn regions_json(&self) -> String {
        to_json(self.workshop.regions())
    }

    pub fn progress_json(&self) -> String {
        to_json(&self.workshop.progress_markers())
    }

    pub fn rating_json(&self) -> String {
        to_json(&self.workshop.rating())
    }

    // ---- Buffer accessors ----

    pub fn vertices_ptr(&self) -> *const f32 {
        self.canvas.buffer_ptr()
    }

    pub fn vertex_count(&self) -> u32 {
        self.canvas.vertex_count() as u32
    }

    pub fn vertex_floats(&self) -> u32 {
        SurfaceVertex::FLOATS as u32
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.events.as_ptr() as *const f32
    }

    pub fn events_len(&self) -> u32 {
        self.events.len() as u32
    }

    pub fn surface_width(&self) -> f32 {
        self.workshop.surface_size().x
    }

    pub fn surface_height(&self) -> f32 {
        self.workshop.surface_size().y
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| {
        log::warn!("failed to serialize for the host: {err}");
        "null".to_string()
    })
}
