mod helpers;
mod renderer;
