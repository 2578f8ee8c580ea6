use super::{Adapter, GeometryMount, Loadable};
use crate::error::Result;
use crate::frame::FrameContext;
use crate::loader::{FontData, PendingAsset};
use crate::palette::Rgb;
use crate::text::{TextMesh, TextOptions};
use crate::target::{SharedTint, TintTarget};
use std::task::Poll;

struct MountedText<N> {
    mesh: TextMesh,
    node: N,
    revision: u64,
}

/// Shows extruded text once its font has loaded.
pub struct TextMeshAdapter<M: GeometryMount> {
    label: String,
    pending: Option<PendingAsset<FontData>>,
    options: TextOptions,
    mount: M,
    tint: Option<SharedTint>,
    text: Loadable<MountedText<M::Node>>,
}

impl<M: GeometryMount> TextMeshAdapter<M> {
    /// Waits for the font, then mounts `options.text` through `mount`.
    pub fn new(pending: PendingAsset<FontData>, options: TextOptions, mount: M) -> Self {
        TextMeshAdapter {
            label: pending.label().to_owned(),
            pending: Some(pending),
            options,
            mount,
            tint: None,
            text: Loadable::NotReady,
        }
    }

    /// Follows the colors written into `tint` by other adapters.
    pub fn with_tint(mut self, tint: SharedTint) -> Self {
        self.tint = Some(tint);
        self
    }

    /// The options the mesh is (or will be) built from.
    pub fn options(&self) -> &TextOptions {
        &self.options
    }

    /// The text mesh, once the font is available.
    pub fn text_mesh(&self) -> Option<&TextMesh> {
        self.text.as_ref().map(|t| &t.mesh)
    }

    /// The mounted node, once the font is available.
    pub fn node(&self) -> Option<&M::Node> {
        self.text.as_ref().map(|t| &t.node)
    }

    /// Changes the text; the geometry is remounted on the next update.
    pub fn set_text(&mut self, text: &str) {
        self.options.text = text.to_owned();
        if let Some(mounted) = self.text.as_mut() {
            mounted.mesh.set_text(text);
        }
    }

    /// Changes the fill color.
    pub fn set_color(&mut self, color: Rgb) {
        self.options.color = color;
        if let Some(mounted) = self.text.as_mut() {
            mounted.mesh.set_color(color);
            mounted.node.set_tint(color);
        }
    }
}

impl<M: GeometryMount> Adapter for TextMeshAdapter<M> {
    fn label(&self) -> &str {
        &self.label
    }

    fn is_ready(&self) -> bool {
        self.text.is_ready()
    }

    fn update(&mut self, _frame: &FrameContext<'_>) -> Result<()> {
        if let Some(color) = self.tint.as_ref().and_then(SharedTint::take) {
            self.set_color(color);
        }

        if let Loadable::Ready(mounted) = &mut self.text {
            if mounted.revision != mounted.mesh.revision() {
                self.mount.unmount(&mut mounted.node);
                mounted.node = self.mount.mount_geometry(mounted.mesh.geometry());
                mounted.node.set_tint(mounted.mesh.color());
                mounted.revision = mounted.mesh.revision();
            }
            return Ok(());
        }

        let Some(pending) = &mut self.pending else {
            return Ok(());
        };

        match pending.poll() {
            Poll::Pending => {}
            Poll::Ready(Ok(font)) => {
                self.pending = None;
                let mesh = TextMesh::new(font, self.options.clone());
                let mut node = self.mount.mount_geometry(mesh.geometry());
                node.set_tint(mesh.color());
                log::info!(
                    "`{}` ready: {} triangles",
                    self.label,
                    mesh.geometry().num_triangles()
                );
                self.text = Loadable::Ready(MountedText {
                    revision: mesh.revision(),
                    mesh,
                    node,
                });
            }
            Poll::Ready(Err(err)) => {
                self.pending = None;
                log::error!("`{}` failed to load its font: {}", self.label, err);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::loader;
    use crate::mesh::MeshData;

    #[derive(Default)]
    struct CountingMount {
        mounted: usize,
    }

    impl GeometryMount for CountingMount {
        type Node = SharedTint;

        fn mount_geometry(&mut self, _mesh: &MeshData) -> SharedTint {
            self.mounted += 1;
            SharedTint::new()
        }

        fn unmount(&mut self, _node: &mut SharedTint) {}
    }

    fn frame() -> FrameContext<'static> {
        FrameContext {
            delta: 0.016,
            elapsed: 0.016,
            frame: 2,
            physics: None,
        }
    }

    #[test]
    fn stays_not_ready_while_the_font_loads() {
        let (_sender, pending) = loader::channel::<FontData>("font");
        let mut adapter =
            TextMeshAdapter::new(pending, TextOptions::new("lumina"), CountingMount::default());

        for _ in 0..3 {
            adapter.update(&frame()).unwrap();
        }
        assert!(!adapter.is_ready());
        assert!(adapter.node().is_none());
        assert_eq!(adapter.mount.mounted, 0);
    }

    #[test]
    fn load_failure_keeps_the_adapter_idle() {
        let (sender, pending) = loader::channel::<FontData>("font");
        let mut adapter =
            TextMeshAdapter::new(pending, TextOptions::new("lumina"), CountingMount::default());
        sender.send(Err(Error::Canceled("font".to_owned())));

        adapter.update(&frame()).unwrap();
        adapter.update(&frame()).unwrap();
        assert!(!adapter.is_ready());
        assert_eq!(adapter.mount.mounted, 0);
    }

    #[test]
    fn shared_tint_recolors_before_the_font_arrives() {
        let (_sender, pending) = loader::channel::<FontData>("font");
        let tint = SharedTint::new();
        let mut adapter =
            TextMeshAdapter::new(pending, TextOptions::new("lumina"), CountingMount::default())
                .with_tint(tint.clone());

        let mut writer = tint;
        writer.set_tint(Rgb::new(10.0, 20.0, 30.0));
        adapter.update(&frame()).unwrap();
        assert_eq!(adapter.options().color, Rgb::new(10.0, 20.0, 30.0));
    }
}
