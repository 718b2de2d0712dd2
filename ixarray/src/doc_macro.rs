// Doc comments passed through here may carry ```svgbob blocks. With the `doc` feature they
// are rendered to SVG; otherwise they are joined back into a plain doc string.
#[cfg(feature = "doc")]
macro_rules! diagram_doc {
    (
        $($t:tt)*
    ) => (
        svgbobdoc::transform!(
            $($t)*
        )
    )
}

#[cfg(not(feature = "doc"))]
macro_rules! diagram_doc {
    (
        $( #[doc = $d:literal] )*
    ) => (
        core::concat!( $( $d, '\n' ),* )
    );
}

pub(crate) use diagram_doc;
