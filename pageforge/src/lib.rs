// Landing page generation workflow
pub mod generator;

// External generative service clients
pub mod services;
