use point_light_core::sampling::SamplePose;

use crate::clip::Frame;

/// Endless, on-demand frames of a pose source at a fixed rate.
///
/// The only state is the index of the next frame: frame `i` is always sampled at
/// `i / frame_rate`, so a stream yields exactly the frames of a clip generated at the same
/// rate. Consumers stop by dropping it.
#[derive(Clone, Debug)]
pub struct PoseStream<S> {
    source: S,
    frame_rate: f64,
    next_index: usize,
}

impl<S: SamplePose> PoseStream<S> {
    /// `frame_rate` must already be validated.
    pub(crate) fn new(source: S, frame_rate: f64) -> Self {
        Self {
            source,
            frame_rate,
            next_index: 0,
        }
    }

    pub fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    /// Index of the frame the next call to `next` yields.
    pub fn position(&self) -> usize {
        self.next_index
    }

    pub fn seek(&mut self, index: usize) {
        self.next_index = index;
    }

    pub fn restart(&mut self) {
        self.seek(0);
    }

    pub fn frame_at(&self, index: usize) -> Frame {
        Frame::sample(&self.source, index, self.frame_rate)
    }
}

impl<S: SamplePose> Iterator for PoseStream<S> {
    type Item = Frame;

    fn next(&mut self) -> Option<Self::Item> {
        let frame = self.frame_at(self.next_index);
        self.next_index += 1;
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.next_index += n;
        self.next()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::sequencer::iterate;
    use point_light_actions::prelude::*;

    fn running() -> PoseFunction {
        build_pose_function(
            Arc::new(Skeleton::point_light_figure()),
            "running",
            SubjectTags::default(),
        )
        .unwrap()
    }

    #[test]
    fn frames_are_indexed_in_order() {
        let pose_fn = running();
        let mut stream = iterate(&pose_fn, 25.).unwrap();
        assert_eq!(stream.frame_rate(), 25.);
        for i in 0..40 {
            let frame = stream.next().unwrap();
            assert_eq!(frame.index, i);
            assert_eq!(frame.time, i as f64 / 25.);
            assert_eq!(frame.pose, pose_fn.sample(i as f64 / 25.));
        }
        assert_eq!(stream.position(), 40);
    }

    #[test]
    fn seek_and_restart() {
        let mut stream = iterate(running(), 30.).unwrap();
        let first: Vec<_> = stream.by_ref().take(5).collect();

        stream.seek(100);
        assert_eq!(stream.next().unwrap().index, 100);
        assert_eq!(stream.nth(9).unwrap().index, 110);

        stream.restart();
        let again: Vec<_> = stream.take(5).collect();
        assert_eq!(first, again);
    }

    #[test]
    fn streams_never_end() {
        let stream = iterate(Skeleton::point_light_figure(), 30.).unwrap();
        assert_eq!(stream.size_hint(), (usize::MAX, None));
        assert_eq!(stream.skip(10_000).next().map(|frame| frame.index), Some(10_000));
    }
}
