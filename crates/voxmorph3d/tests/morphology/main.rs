mod common;
mod density_shell;
mod shape_morphology;
mod slice_scheduler;
