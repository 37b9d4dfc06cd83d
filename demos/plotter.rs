use gpui::{AppContext, Application, Bounds, Focusable, WindowBounds, WindowOptions, px, size};
use tracing_subscriber::EnvFilter;

use gpui_funcplot::{Curve, GpuiPlotterView, Line, Plotter, RealPoint, ViewportSize, bind_keys};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    Application::new().run(|cx| {
        bind_keys(cx);

        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                None,
                size(px(720.0), px(480.0)),
                cx,
            ))),
            ..Default::default()
        };

        cx.open_window(options, |window, cx| {
            let mut plotter = Plotter::new(ViewportSize::new(720.0, 480.0));
            plotter.add(RealPoint::new(3.0, 4.0));
            plotter.add(Line::new(RealPoint::new(-6.0, -2.0), RealPoint::new(-1.0, 3.0)));
            plotter.add(Curve::parse("sin(x)*3").unwrap());
            plotter.submit_function("x^2/4 - 2");
            plotter.submit_point("(pi,-1)");

            let view = cx.new(|cx| GpuiPlotterView::new(plotter, cx));
            window.focus(&view.focus_handle(cx));
            view
        })
        .unwrap();
    });
}
