mod chunker;
mod pixelizations;
mod rangeset;
mod regions;
