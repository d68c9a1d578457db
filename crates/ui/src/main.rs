#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 720.0])
            .with_title("scrollspy"),
        ..Default::default()
    };
    eframe::run_native(
        "scrollspy",
        options,
        Box::new(|cc| Ok(Box::new(scrollspy_ui::PageApp::new(cc)))),
    )
}

// The web build starts through the library's wasm entry point instead.
#[cfg(target_arch = "wasm32")]
fn main() {}
