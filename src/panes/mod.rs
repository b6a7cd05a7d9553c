mod surface_pane;

pub use surface_pane::SurfacePane;
