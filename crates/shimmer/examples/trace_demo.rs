//! Skeleton lifecycle demo
//!
//! Mirrors a small feed card, runs it through a delayed show, an update and a
//! hide, and logs every renderer call.
//!
//! Run with:
//! ```sh
//! RUST_LOG=shimmer_tree=debug cargo run -p shimmer --example trace_demo
//! ```

use std::time::Duration;

use anyhow::Result;
use shimmer::prelude::*;
use shimmer::SkeletonDecoration;

/// Renderer that only logs what it is asked to do
struct LogRenderer;

impl SkeletonRenderer for LogRenderer {
    fn apply_decoration(
        &mut self,
        node: NodeId,
        decoration: &SkeletonDecoration,
        size: Size,
        transition: TransitionStyle,
    ) {
        tracing::info!(
            "apply {:?} {:?} {}x{} over {:?}",
            node,
            decoration.kind,
            size.width,
            size.height,
            transition.duration()
        );
    }

    fn refresh_decoration(&mut self, node: NodeId, decoration: &SkeletonDecoration) {
        tracing::info!("refresh {:?} -> {:?}", node, decoration.colors.as_slice());
    }

    fn resize_decoration(&mut self, node: NodeId, size: Size) {
        tracing::info!("resize {:?} to {}x{}", node, size.width, size.height);
    }

    fn remove_decoration(&mut self, node: NodeId, transition: TransitionStyle) {
        tracing::info!("remove {:?} over {:?}", node, transition.duration());
    }

    fn start_animation(&mut self, node: NodeId, animation: &SkeletonAnimation) {
        tracing::info!("animate {:?} with {:?}", node, animation);
    }

    fn stop_animation(&mut self, node: NodeId) {
        tracing::info!("stop animating {:?}", node);
    }

    fn layout(&mut self, node: NodeId) {
        tracing::info!("layout {:?}", node);
    }

    fn reload_data(&mut self, node: NodeId) {
        tracing::info!("reload {:?}", node);
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    AppearanceState::init(SkeletonAppearance::from_toml_str(
        r#"
        transition = { cross_dissolve = 0.2 }

        [animation]
        kind = "sliding"
        direction = "top_left_bottom_right"
        duration = 1.2
        "#,
    )?)?;

    let mut tree = SkeletonTree::new();
    let card = tree.insert_with_size(Capability::Skeletonable, Size::new(320.0, 96.0));
    let avatar = tree.add_child(card, Capability::Skeletonable)?;
    let text = tree.add_child(card, Capability::Plain)?;
    let title = tree.add_child(text, Capability::Skeletonable)?;
    let subtitle = tree.add_child(text, Capability::Skeletonable)?;
    tree.add_child(card, Capability::Excluded)?;

    tree.set_size(avatar, Size::new(48.0, 48.0));
    tree.set_size(title, Size::new(200.0, 18.0));
    tree.set_size(subtitle, Size::new(140.0, 14.0));

    let mut skeletons = Skeletons::from_global(tree, LogRenderer);

    tracing::info!("-- delayed show");
    skeletons.show_skeleton_delayed(card, None, None, Duration::from_millis(150), None);
    skeletons.advance_by(Duration::from_millis(100));
    skeletons.advance_by(Duration::from_millis(50));

    tracing::info!("-- gradient update");
    skeletons.update_animated_gradient_skeleton(card, None, None);

    tracing::info!("-- title grows");
    skeletons.tree_mut().set_size(title, Size::new(260.0, 18.0));
    skeletons.layout_skeleton_if_needed(card);

    tracing::info!("-- hide");
    skeletons.hide_skeleton(card, true, None);

    Ok(())
}
