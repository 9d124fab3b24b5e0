mod config;
mod constants;
mod renderer;
mod separation;
mod simulation;
mod strobe;
mod utils;

use crate::config::SimulationConfig;
use crate::constants::{FPS_UPDATE_INTERVAL_SECS, WINDOW_HEIGHT, WINDOW_TITLE, WINDOW_WIDTH};
use crate::renderer::Renderer;
use crate::simulation::SimulationState;
use crate::strobe::Strobe;
use std::{sync::Arc, time::Instant};
use winit::{
    dpi::PhysicalSize,
    event::{ElementState, Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
            .build(&event_loop)?,
    );
    let mut renderer = pollster::block_on(Renderer::new(window.clone()));
    let mut simulation = SimulationState::new(renderer.size, SimulationConfig::default());
    let mut strobe = Strobe::new();

    // monotonic clock anchored at startup, in milliseconds
    let start = Instant::now();
    let mut last_fps_update = Instant::now();
    let mut frames_since_last_fps_update = 0u32;
    let mut current_fps = 0.0;

    event_loop.run(move |event, elwt: &EventLoopWindowTarget<()>| {
        elwt.set_control_flow(ControlFlow::Poll);
        match event {
            Event::AboutToWait => {
                let now_ms = start.elapsed().as_secs_f64() * 1000.0;
                if !simulation.is_paused() {
                    strobe.update(now_ms);
                }
                simulation.update(now_ms);
                window.request_redraw();
            }
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::Resized(physical_size) => {
                    renderer.resize(physical_size);
                    simulation.resize(physical_size);
                }
                WindowEvent::ScaleFactorChanged { .. } => {
                    let new_inner_size = window.inner_size();
                    renderer.resize(new_inner_size);
                    simulation.resize(new_inner_size);
                }
                WindowEvent::KeyboardInput {
                    event: key_event, ..
                } => {
                    if key_event.state == ElementState::Pressed && !key_event.repeat {
                        match key_event.physical_key {
                            PhysicalKey::Code(KeyCode::Space) => simulation.toggle_pause(),
                            PhysicalKey::Code(KeyCode::KeyR) => {
                                let now_ms = start.elapsed().as_secs_f64() * 1000.0;
                                simulation.restart(now_ms);
                            }
                            PhysicalKey::Code(KeyCode::Escape) => elwt.exit(),
                            _ => {}
                        }
                    }
                }
                WindowEvent::RedrawRequested => {
                    frames_since_last_fps_update += 1;
                    let elapsed_secs = last_fps_update.elapsed().as_secs_f64();
                    if elapsed_secs >= FPS_UPDATE_INTERVAL_SECS {
                        current_fps = frames_since_last_fps_update as f64 / elapsed_secs;
                        last_fps_update = Instant::now();
                        frames_since_last_fps_update = 0;
                    }
                    match renderer.render(&simulation.bodies, strobe.clear_color()) {
                        Ok(_) => {}
                        Err(wgpu::SurfaceError::Lost) => renderer.resize(renderer.size),
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("wgpu ran out of memory");
                            elwt.exit();
                        }
                        Err(e) => log::error!("render failed: {:?}", e),
                    }
                    let paused_text = if simulation.is_paused() { " [PAUSED]" } else { "" };
                    window.set_title(&format!(
                        "{} - Bodies: {} - FPS: {:.1}{}",
                        WINDOW_TITLE,
                        simulation.bodies.len(),
                        current_fps,
                        paused_text
                    ));
                }
                _ => {}
            },
            _ => {}
        }
    })?;
    Ok(())
}
