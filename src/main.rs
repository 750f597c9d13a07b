use clap::Parser;
use env_logger::Env;
use eyre::Result;
use log::info;

use config::Config;
use renderer::Renderer;
use shader::Shader;
use triangle::Triangle;
use window::MyWindow;

mod config;
mod ogl;
mod renderer;
mod shader;
mod triangle;
mod window;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::parse();

    let mut window = MyWindow::new(&config)?;
    let (width, height) = window.size();
    info!("Created a {width}x{height} window '{}'", config.title);

    info!("Renderer: {}", ogl::gl_string(gl::RENDERER));
    info!("OpenGL version: {}", ogl::gl_string(gl::VERSION));

    if config.gl_debug {
        ogl::init_debug();
    }

    let mut renderer = Renderer::new(config.clear_color);
    renderer.resize(width, height);

    let shader = Shader::triangle()?;
    let triangle = Triangle::new()?;

    'render_loop: loop {
        renderer.render(&triangle, &shader);

        let outcome = window.end_frame();
        if let Some((width, height)) = outcome.resized {
            renderer.resize(width, height);
        }

        if outcome.should_quit {
            break 'render_loop;
        }
    }

    info!("Window closed, shutting down");

    Ok(())
}
