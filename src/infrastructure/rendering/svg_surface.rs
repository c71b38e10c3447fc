use std::cell::Cell;
use std::rc::Rc;

use web_sys::{Document, Element};

use super::transition::{ActiveTween, TransitionDriver};
use crate::domain::{
    chart::{Axes, AxisTick, BarExtent, BarGeometry, BarTween, ChartClass, ChartDimensions, ChartSurface},
    errors::{AppResult, dom_error},
    logging::LogComponent,
};
use crate::log_trace;

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;

/// Visual handle for one bar: `<g><rect/><text/></g>`
pub struct SvgBar {
    group: Element,
    rect: Element,
    label: Element,
    shown: Rc<Cell<BarExtent>>,
}

impl SvgBar {
    pub fn group(&self) -> &Element {
        &self.group
    }

    /// Extent currently drawn, which may be mid-transition
    pub fn shown(&self) -> BarExtent {
        self.shown.get()
    }
}

/// SVG implementation of [`ChartSurface`]
pub struct SvgChartSurface {
    document: Document,
    root: Element,
    x_ticks: Element,
    y_ticks: Element,
    bars_group: Element,
    plot_height: f64,
    pending: Vec<ActiveTween>,
    transitions: TransitionDriver,
}

impl SvgChartSurface {
    /// Append the chart skeleton to `container`
    pub fn mount(document: &Document, container: &Element, dimensions: &ChartDimensions) -> AppResult<Self> {
        let margin = dimensions.margin;
        let plot_height = dimensions.plot_height();

        let root = svg_element(document, "svg")?;
        set_attr(&root, "width", dimensions.width)?;
        set_attr(&root, "height", dimensions.height)?;
        container.append_child(&root).map_err(|e| dom_error("append svg", e))?;

        let frame = append_svg(document, &root, "g")?;
        set_attr(&frame, "transform", format!("translate({},{})", margin.left, margin.top))?;

        let x_axis = append_svg(document, &frame, "g")?;
        set_attr(&x_axis, "class", ChartClass::XAxis.as_ref())?;
        set_attr(&x_axis, "transform", format!("translate(0,{plot_height})"))?;
        let x_ticks = append_svg(document, &x_axis, "g")?;

        let y_axis = append_svg(document, &frame, "g")?;
        set_attr(&y_axis, "class", ChartClass::YAxis.as_ref())?;
        let y_ticks = append_svg(document, &y_axis, "g")?;
        let caption = append_svg(document, &y_axis, "text")?;
        set_attr(&caption, "transform", "rotate(-90)")?;
        set_attr(&caption, "y", 6)?;
        set_attr(&caption, "dy", ".71em")?;
        set_attr(&caption, "style", "text-anchor: end")?;
        caption.set_text_content(Some("Tweets"));

        let bars_group = append_svg(document, &frame, "g")?;
        set_attr(&bars_group, "class", ChartClass::Bars.as_ref())?;

        Ok(Self {
            document: document.clone(),
            root,
            x_ticks,
            y_ticks,
            bars_group,
            plot_height,
            pending: Vec::new(),
            transitions: TransitionDriver::new(),
        })
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn bars_group(&self) -> &Element {
        &self.bars_group
    }

    fn draw_x_axis(&self, plot_width: f64, ticks: &[AxisTick]) -> AppResult<()> {
        self.x_ticks.set_inner_html("");
        let domain = append_svg(&self.document, &self.x_ticks, "path")?;
        set_attr(&domain, "class", ChartClass::Domain.as_ref())?;
        set_attr(&domain, "d", format!("M0,{TICK_SIZE}V0H{plot_width}V{TICK_SIZE}"))?;

        for tick in ticks {
            let group = append_svg(&self.document, &self.x_ticks, "g")?;
            set_attr(&group, "class", ChartClass::Tick.as_ref())?;
            set_attr(&group, "transform", format!("translate({},0)", tick.position))?;
            let line = append_svg(&self.document, &group, "line")?;
            set_attr(&line, "y2", TICK_SIZE)?;
            let text = append_svg(&self.document, &group, "text")?;
            set_attr(&text, "y", TICK_SIZE + TICK_PADDING)?;
            set_attr(&text, "dy", ".71em")?;
            set_attr(&text, "style", "text-anchor: middle")?;
            text.set_text_content(Some(&tick.label));
        }
        Ok(())
    }

    fn draw_y_axis(&self, ticks: &[AxisTick]) -> AppResult<()> {
        self.y_ticks.set_inner_html("");
        let domain = append_svg(&self.document, &self.y_ticks, "path")?;
        set_attr(&domain, "class", ChartClass::Domain.as_ref())?;
        set_attr(&domain, "d", format!("M-{TICK_SIZE},0H0V{}H-{TICK_SIZE}", self.plot_height))?;

        for tick in ticks {
            let group = append_svg(&self.document, &self.y_ticks, "g")?;
            set_attr(&group, "class", ChartClass::Tick.as_ref())?;
            set_attr(&group, "transform", format!("translate(0,{})", tick.position))?;
            let line = append_svg(&self.document, &group, "line")?;
            set_attr(&line, "x2", -TICK_SIZE)?;
            let text = append_svg(&self.document, &group, "text")?;
            set_attr(&text, "x", -(TICK_SIZE + TICK_PADDING))?;
            set_attr(&text, "dy", ".32em")?;
            set_attr(&text, "style", "text-anchor: end")?;
            text.set_text_content(Some(&tick.label));
        }
        Ok(())
    }
}

impl ChartSurface for SvgChartSurface {
    type Handle = SvgBar;

    fn enter(&mut self, index: usize) -> AppResult<SvgBar> {
        log_trace!(LogComponent::Infrastructure("SvgChartSurface"), "enter bar {}", index);
        let group = append_svg(&self.document, &self.bars_group, "g")?;
        let rect = append_svg(&self.document, &group, "rect")?;
        let label = append_svg(&self.document, &group, "text")?;
        set_attr(&label, "dy", ".75em")?;

        let baseline = BarExtent::baseline(self.plot_height);
        set_attr(&rect, "y", baseline.y)?;
        set_attr(&rect, "height", baseline.height)?;
        set_attr(&label, "y", baseline.label_y)?;

        Ok(SvgBar { group, rect, label, shown: Rc::new(Cell::new(baseline)) })
    }

    fn update(&mut self, handle: &mut SvgBar, bar: &BarGeometry) -> AppResult<()> {
        set_attr(&handle.group, "transform", format!("translate({},0)", bar.x))?;
        handle
            .group
            .class_list()
            .toggle_with_force(ChartClass::Filling.as_ref(), bar.filling)
            .map_err(|e| dom_error("toggle filling", e))?;

        set_attr(&handle.rect, "width", bar.rect_width.max(0.0))?;
        set_attr(&handle.label, "x", bar.label_x)?;
        handle.label.set_text_content(Some(&bar.label));

        self.pending.push(ActiveTween {
            rect: handle.rect.clone(),
            label: handle.label.clone(),
            shown: handle.shown.clone(),
            tween: BarTween::new(handle.shown.get(), bar.extent),
        });
        Ok(())
    }

    fn exit(&mut self, handle: SvgBar) -> AppResult<()> {
        handle.group.remove();
        Ok(())
    }

    fn draw_axes(&mut self, dimensions: &ChartDimensions, axes: &Axes) -> AppResult<()> {
        self.draw_x_axis(dimensions.plot_width(), &axes.x_ticks)?;
        self.draw_y_axis(&axes.y_ticks)
    }

    fn commit(&mut self) -> AppResult<()> {
        self.transitions.start(std::mem::take(&mut self.pending));
        Ok(())
    }
}

fn svg_element(document: &Document, tag: &str) -> AppResult<Element> {
    document
        .create_element_ns(Some(SVG_NS), tag)
        .map_err(|e| dom_error(&format!("create <{tag}>"), e))
}

fn append_svg(document: &Document, parent: &Element, tag: &str) -> AppResult<Element> {
    let element = svg_element(document, tag)?;
    parent
        .append_child(&element)
        .map_err(|e| dom_error(&format!("append <{tag}>"), e))?;
    Ok(element)
}

fn set_attr(element: &Element, name: &str, value: impl ToString) -> AppResult<()> {
    element
        .set_attribute(name, &value.to_string())
        .map_err(|e| dom_error(&format!("set {name}"), e))
}
