use crate::refs::{ObjectReferences, RefType};
use crate::{PDFError, Pt};
use image::{ColorType, DynamicImage, GenericImageView, ImageFormat};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf, Ref};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use usvg::Tree;

pub enum RasterImageType {
    /// Baseline RGB JPEGs are embedded as-is
    DirectlyEmbeddableJpeg(PathBuf),
    Image(DynamicImage),
}

pub enum ImageType {
    Raster(RasterImageType),
    SVG(Box<Tree>),
}

/// An image to be embedded in a document, along with its natural size. Raster images
/// are sized in pixels, SVGs in user units; both are treated as points.
pub struct Image {
    pub image: ImageType,
    pub width: Pt,
    pub height: Pt,
}

struct EncodedRaster {
    filter: Filter,
    bytes: Vec<u8>,
    mask: Option<Vec<u8>>,
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

impl Image {
    /// Load an image from disk, treating `.svg` files as vector images and anything else
    /// as a raster format the `image` crate can read
    pub fn new_from_disk<P: AsRef<Path>>(path: P) -> Result<Image, PDFError> {
        let path = path.as_ref();
        log::debug!("loading image from {}", path.display());
        if has_extension(path, "svg") {
            let data = std::fs::read(path)?;
            Self::new_svg(&data)
        } else {
            Self::new_raster_from_disk(path)
        }
    }

    pub fn new_svg(data: &[u8]) -> Result<Image, PDFError> {
        let tree = Tree::from_data(data, &usvg::Options::default())?;
        let size = tree.size();
        Ok(Image {
            width: Pt(size.width()),
            height: Pt(size.height()),
            image: ImageType::SVG(Box::new(tree)),
        })
    }

    pub fn new_raster_from_disk(path: &Path) -> Result<Image, PDFError> {
        let data = std::fs::read(path)?;
        let format = if has_extension(path, "tga") {
            ImageFormat::Tga
        } else {
            image::guess_format(&data)?
        };
        let image = image::load_from_memory_with_format(&data, format)?;

        if format == ImageFormat::Jpeg && image.color() == ColorType::Rgb8 {
            Ok(Image {
                width: Pt(image.width() as f32),
                height: Pt(image.height() as f32),
                image: ImageType::Raster(RasterImageType::DirectlyEmbeddableJpeg(
                    path.to_path_buf(),
                )),
            })
        } else {
            Ok(Self::new_raster(image))
        }
    }

    pub fn new_raster(image: DynamicImage) -> Image {
        Image {
            width: Pt(image.width() as f32),
            height: Pt(image.height() as f32),
            image: ImageType::Raster(RasterImageType::Image(image)),
        }
    }

    fn encode_raster(raster: &RasterImageType) -> Result<EncodedRaster, PDFError> {
        match raster {
            RasterImageType::DirectlyEmbeddableJpeg(path) => Ok(EncodedRaster {
                filter: Filter::DctDecode,
                bytes: std::fs::read(path)?,
                mask: None,
            }),
            RasterImageType::Image(image) => {
                let level = CompressionLevel::DefaultLevel as u8;
                let mask = image.color().has_alpha().then(|| {
                    let alphas: Vec<u8> = image.pixels().map(|(_, _, pixel)| pixel.0[3]).collect();
                    compress_to_vec_zlib(&alphas, level)
                });
                Ok(EncodedRaster {
                    filter: Filter::FlateDecode,
                    bytes: compress_to_vec_zlib(image.to_rgb8().as_raw(), level),
                    mask,
                })
            }
        }
    }

    fn write_raster(
        &self,
        raster: &RasterImageType,
        refs: &mut ObjectReferences,
        index: usize,
        writer: &mut Pdf,
    ) -> Result<(), PDFError> {
        let encoded = Self::encode_raster(raster)?;
        let id = refs.gen(RefType::Image(index));
        let (width, height) = (self.width.0 as i32, self.height.0 as i32);

        let mask_id = encoded
            .mask
            .as_ref()
            .map(|_| refs.gen(RefType::ImageMask(index)));

        let mut image = writer.image_xobject(id, encoded.bytes.as_slice());
        image.filter(encoded.filter);
        image.width(width);
        image.height(height);
        image.color_space().device_rgb();
        image.bits_per_component(8);
        if let Some(mask_id) = mask_id {
            image.s_mask(mask_id);
        }
        image.finish();

        if let (Some(mask_id), Some(mask)) = (mask_id, encoded.mask.as_ref()) {
            let mut s_mask = writer.image_xobject(mask_id, mask.as_slice());
            s_mask.filter(Filter::FlateDecode);
            s_mask.width(width);
            s_mask.height(height);
            s_mask.color_space().device_gray();
            s_mask.bits_per_component(8);
        }

        Ok(())
    }

    /// Converts the SVG into a form XObject chunk and splices it into the document,
    /// renumbering its objects so the root lands on this image's reference
    fn write_svg(
        tree: &Tree,
        refs: &mut ObjectReferences,
        index: usize,
        writer: &mut Pdf,
    ) -> Result<(), PDFError> {
        let (chunk, root) = svg2pdf::to_chunk(tree, svg2pdf::ConversionOptions::default())
            .map_err(|e| PDFError::SvgConversion(format!("{e:?}")))?;

        let id = refs.gen(RefType::Image(index));
        let mut renumbered: HashMap<Ref, Ref> = HashMap::new();
        renumbered.insert(root, id);
        let chunk = chunk.renumber(|old| *renumbered.entry(old).or_insert_with(|| refs.alloc()));
        writer.extend(&chunk);

        Ok(())
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        index: usize,
        writer: &mut Pdf,
    ) -> Result<(), PDFError> {
        log::debug!("writing image I{index} ({}x{})", self.width, self.height);
        match &self.image {
            ImageType::Raster(raster) => self.write_raster(raster, refs, index, writer),
            ImageType::SVG(tree) => Self::write_svg(tree, refs, index, writer),
        }
    }
}
